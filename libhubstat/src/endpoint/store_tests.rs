use super::*;
use tempfile::tempdir;

#[test]
fn test_file_endpoint_store_empty_when_file_missing() {
    let temp_dir = tempdir().unwrap();
    let store = FileEndpointStore::new(temp_dir.path().join("endpoints.toml")).unwrap();

    assert!(store.list().unwrap().is_empty());
    assert_eq!(store.endpoint(1).unwrap(), EndpointLookup::NotFound);
}

#[test]
fn test_file_endpoint_store_create_assigns_increasing_ids() {
    let temp_dir = tempdir().unwrap();
    let store = FileEndpointStore::new(temp_dir.path().join("endpoints.toml")).unwrap();

    let first = store
        .create("local", "unix:///var/run/docker.sock", EndpointType::Docker)
        .unwrap();
    let second = store
        .create("remote", "tcp://10.0.0.5:2375", EndpointType::Docker)
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[test]
fn test_file_endpoint_store_lookup_found() {
    let temp_dir = tempdir().unwrap();
    let store = FileEndpointStore::new(temp_dir.path().join("endpoints.toml")).unwrap();
    let created = store
        .create("local", "unix:///var/run/docker.sock", EndpointType::Docker)
        .unwrap();

    match store.endpoint(created.id).unwrap() {
        EndpointLookup::Found(endpoint) => assert_eq!(endpoint, created),
        EndpointLookup::NotFound => panic!("Expected endpoint to be found"),
    }
}

#[test]
fn test_file_endpoint_store_persists_across_instances() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("endpoints.toml");

    {
        let store = FileEndpointStore::new(path.clone()).unwrap();
        store
            .create("k8s", "https://kubernetes.default.svc", EndpointType::KubernetesLocal)
            .unwrap();
    }

    let store = FileEndpointStore::new(path).unwrap();
    let endpoints = store.list().unwrap();
    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].kind, EndpointType::KubernetesLocal);
}

#[test]
fn test_file_endpoint_store_reads_hand_written_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("endpoints.toml");
    std::fs::write(
        &path,
        r#"
[[endpoints]]
id = 7
name = "pipe"
url = "npipe:////./pipe/docker_engine"
type = "docker"
"#,
    )
    .unwrap();

    let store = FileEndpointStore::new(path).unwrap();
    match store.endpoint(7).unwrap() {
        EndpointLookup::Found(endpoint) => {
            assert_eq!(endpoint.name, "pipe");
            assert!(endpoint.shares_server_egress());
        }
        EndpointLookup::NotFound => panic!("Expected endpoint 7"),
    }
}

#[test]
fn test_file_endpoint_store_remove() {
    let temp_dir = tempdir().unwrap();
    let store = FileEndpointStore::new(temp_dir.path().join("endpoints.toml")).unwrap();
    let created = store
        .create("local", "unix:///var/run/docker.sock", EndpointType::Docker)
        .unwrap();

    assert!(store.remove(created.id).unwrap());
    assert!(!store.remove(created.id).unwrap());
    assert_eq!(store.endpoint(created.id).unwrap(), EndpointLookup::NotFound);
}

#[test]
fn test_file_endpoint_store_invalid_file_is_storage_error() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("endpoints.toml");
    std::fs::write(&path, "[[endpoints]]\nid = \"not a number\"\n").unwrap();

    let store = FileEndpointStore::new(path).unwrap();
    assert!(matches!(
        store.endpoint(1),
        Err(HubStatError::Storage { .. })
    ));
}

#[test]
fn test_memory_endpoint_store_lookup_and_list() {
    let store = MemoryEndpointStore::default();
    store
        .create("b", "tcp://10.0.0.5:2375", EndpointType::Docker)
        .unwrap();
    store
        .create("a", "unix:///var/run/docker.sock", EndpointType::Docker)
        .unwrap();

    let endpoints = store.list().unwrap();
    assert_eq!(endpoints.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(matches!(store.endpoint(2).unwrap(), EndpointLookup::Found(_)));
    assert_eq!(store.endpoint(3).unwrap(), EndpointLookup::NotFound);
}

#[test]
fn test_memory_endpoint_store_remove() {
    let store = MemoryEndpointStore::default();
    let created = store
        .create("a", "unix:///var/run/docker.sock", EndpointType::Docker)
        .unwrap();

    assert!(store.remove(created.id).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_create_fails_when_identifiers_are_exhausted() {
    let store = MemoryEndpointStore::new(vec![Endpoint {
        id: EndpointId::MAX,
        name: "last".to_string(),
        url: "unix:///var/run/docker.sock".to_string(),
        kind: EndpointType::Docker,
    }]);

    let err = store
        .create("overflow", "tcp://10.0.0.5:2375", EndpointType::Docker)
        .unwrap_err();

    assert!(matches!(err, HubStatError::Storage { .. }));
    assert_eq!(err.http_status(), 500);
    assert_eq!(store.list().unwrap().len(), 1);
}
