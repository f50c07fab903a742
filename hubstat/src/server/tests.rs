use super::*;
use libhubstat::auth::MemoryCredentialStore;
use libhubstat::endpoint::MemoryEndpointStore;
use libhubstat::{Config, DockerHub, StatusService};
use std::sync::Arc;

fn test_state() -> AppState {
    AppState {
        service: StatusService::new(
            Arc::new(MemoryEndpointStore::default()),
            Arc::new(MemoryCredentialStore::default()),
            DockerHub::with_defaults().unwrap(),
        ),
    }
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let result = run("127.0.0.1:0", test_state(), async {}).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_run_reports_bind_failure() {
    let err = run("not-an-address", test_state(), async {})
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::Bind { .. }));
    assert!(err.to_string().contains("not-an-address"));
}

#[test]
fn test_default_bind_comes_from_config() {
    let ctx = AppContext::from_config(Config::default());
    assert_eq!(ctx.config.server.bind, "127.0.0.1:9000");
}
