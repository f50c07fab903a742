use super::*;
use crate::error::HubStatError;
use mockito::{Matcher, Server};
use std::error::Error;

const TOKEN_PATH: &str = "/token";
const LIMITS_PATH: &str = "/v2/ratelimitpreview/test/manifests/latest";

fn dockerhub_for(server: &Server) -> DockerHub {
    let urls = DockerHubUrls {
        token_url: format!(
            "{}{}?service=registry.docker.io&scope=repository:ratelimitpreview/test:pull",
            server.url(),
            TOKEN_PATH
        ),
        rate_limits_url: format!("{}{}", server.url(), LIMITS_PATH),
    };
    DockerHub::new(Client::new().unwrap(), urls)
}

#[test]
fn test_default_urls_point_at_dockerhub() {
    let urls = DockerHubUrls::default();
    assert_eq!(
        urls.token_url,
        "https://auth.docker.io/token?service=registry.docker.io&scope=repository:ratelimitpreview/test:pull"
    );
    assert_eq!(
        urls.rate_limits_url,
        "https://registry-1.docker.io/v2/ratelimitpreview/test/manifests/latest"
    );
}

#[test]
fn test_rate_limit_status_serializes_remaining_and_limit() {
    let status = RateLimitStatus {
        remaining: 17,
        limit: 100,
    };
    let json = serde_json::to_string(&status).unwrap();
    assert_eq!(json, r#"{"remaining":17,"limit":100}"#);
}

#[test]
fn test_token_debug_is_redacted() {
    let token = Token::new("abc123");
    assert_eq!(format!("{:?}", token), "Token(<redacted>)");
    assert_eq!(token.as_str(), "abc123");
}

#[tokio::test]
async fn test_acquire_token_anonymous() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("service".into(), "registry.docker.io".into()),
            Matcher::UrlEncoded(
                "scope".into(),
                "repository:ratelimitpreview/test:pull".into(),
            ),
        ]))
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"abc123"}"#)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let token = dockerhub
        .acquire_token(&DockerHubCredentials::anonymous())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(token.as_str(), "abc123");
}

#[tokio::test]
async fn test_acquire_token_with_basic_auth() {
    let mut server = Server::new_async().await;
    // base64("user:pass")
    let mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_status(200)
        .with_body(r#"{"token":"authed"}"#)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let token = dockerhub
        .acquire_token(&DockerHubCredentials::basic("user", "pass"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(token.as_str(), "authed");
}

#[tokio::test]
async fn test_acquire_token_skips_basic_auth_when_disabled() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"token":"anon"}"#)
        .create_async()
        .await;

    let credentials = DockerHubCredentials {
        authentication: false,
        username: "user".to_string(),
        password: "pass".to_string(),
    };
    let dockerhub = dockerhub_for(&server);
    let token = dockerhub.acquire_token(&credentials).await.unwrap();

    mock.assert_async().await;
    assert_eq!(token.as_str(), "anon");
}

#[tokio::test]
async fn test_acquire_token_unauthorized() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("incorrect username or password")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let err = dockerhub
        .acquire_token(&DockerHubCredentials::basic("user", "wrong"))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        HubStatError::UpstreamAuth {
            status_code: Some(401),
            ..
        }
    ));
    assert!(err.is_credentials_rejected());
}

#[tokio::test]
async fn test_acquire_token_server_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let err = dockerhub
        .acquire_token(&DockerHubCredentials::anonymous())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        HubStatError::UpstreamAuth {
            status_code: Some(500),
            ..
        }
    ));
    assert!(!err.is_credentials_rejected());
}

#[tokio::test]
async fn test_acquire_token_invalid_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let err = dockerhub
        .acquire_token(&DockerHubCredentials::anonymous())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, HubStatError::UpstreamAuth { .. }));
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_acquire_token_wrong_shape() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"access_token":"abc123"}"#)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let result = dockerhub
        .acquire_token(&DockerHubCredentials::anonymous())
        .await;

    assert!(matches!(result, Err(HubStatError::UpstreamAuth { .. })));
}

#[tokio::test]
async fn test_fetch_rate_limits_with_injected_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("HEAD", LIMITS_PATH)
        .match_header("authorization", "Bearer injected")
        .with_status(200)
        .with_header("RateLimit-Limit", "100;w=21600")
        .with_header("RateLimit-Remaining", "42;w=21600")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let status = dockerhub
        .fetch_rate_limits(&Token::new("injected"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        status,
        RateLimitStatus {
            remaining: 42,
            limit: 100
        }
    );
}

#[tokio::test]
async fn test_fetch_rate_limits_non_ok_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("HEAD", LIMITS_PATH)
        .with_status(403)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let err = dockerhub
        .fetch_rate_limits(&Token::new("t"))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        HubStatError::UpstreamRateLimit {
            status_code: Some(403),
            ..
        }
    ));
}

#[tokio::test]
async fn test_fetch_rate_limits_missing_limit_header() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("HEAD", LIMITS_PATH)
        .with_status(200)
        .with_header("RateLimit-Remaining", "42;w=21600")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let err = dockerhub
        .fetch_rate_limits(&Token::new("t"))
        .await
        .unwrap_err();

    assert!(matches!(err, HubStatError::UpstreamProtocol { .. }));
    assert_eq!(err.to_string(), "Failed fetching RateLimit-Limit header");
    assert_eq!(
        err.source().unwrap().to_string(),
        "Missing RateLimit-Limit header"
    );
}

#[tokio::test]
async fn test_fetch_rate_limits_malformed_remaining_header() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("HEAD", LIMITS_PATH)
        .with_status(200)
        .with_header("RateLimit-Limit", "100;w=21600")
        .with_header("RateLimit-Remaining", "abc")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let err = dockerhub
        .fetch_rate_limits(&Token::new("t"))
        .await
        .unwrap_err();

    assert!(matches!(err, HubStatError::UpstreamProtocol { .. }));
    assert_eq!(err.to_string(), "Failed fetching RateLimit-Remaining header");
}

#[tokio::test]
async fn test_status_end_to_end() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"token":"abc123"}"#)
        .create_async()
        .await;
    let limits_mock = server
        .mock("HEAD", LIMITS_PATH)
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_header("RateLimit-Limit", "100;w=21600")
        .with_header("RateLimit-Remaining", "17;w=21600")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let status = dockerhub
        .status(&DockerHubCredentials::anonymous())
        .await
        .unwrap();

    token_mock.assert_async().await;
    limits_mock.assert_async().await;
    assert_eq!(
        status,
        RateLimitStatus {
            remaining: 17,
            limit: 100
        }
    );
}

#[tokio::test]
async fn test_status_token_rejected_never_contacts_registry() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;
    let limits_mock = server
        .mock("HEAD", LIMITS_PATH)
        .with_status(200)
        .with_header("RateLimit-Limit", "100;w=21600")
        .with_header("RateLimit-Remaining", "17;w=21600")
        .expect(0)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let result = dockerhub.status(&DockerHubCredentials::basic("u", "p")).await;

    token_mock.assert_async().await;
    limits_mock.assert_async().await;
    assert!(matches!(result, Err(HubStatError::UpstreamAuth { .. })));
}

#[tokio::test]
async fn test_status_missing_remaining_returns_no_partial_status() {
    let mut server = Server::new_async().await;
    let _token_mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"token":"abc123"}"#)
        .create_async()
        .await;
    let limits_mock = server
        .mock("HEAD", LIMITS_PATH)
        .with_status(200)
        .with_header("RateLimit-Limit", "100;w=21600")
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let result = dockerhub.status(&DockerHubCredentials::anonymous()).await;

    limits_mock.assert_async().await;
    match result {
        Err(HubStatError::UpstreamProtocol { message, .. }) => {
            assert!(message.contains("RateLimit-Remaining"));
        }
        other => panic!("Expected UpstreamProtocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_is_independent_per_call() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("GET", TOKEN_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"token":"abc123"}"#)
        .expect(2)
        .create_async()
        .await;
    let limits_mock = server
        .mock("HEAD", LIMITS_PATH)
        .with_status(200)
        .with_header("RateLimit-Limit", "100;w=21600")
        .with_header("RateLimit-Remaining", "17;w=21600")
        .expect(2)
        .create_async()
        .await;

    let dockerhub = dockerhub_for(&server);
    let credentials = DockerHubCredentials::anonymous();
    let (first, second) = tokio::join!(
        dockerhub.status(&credentials),
        dockerhub.status(&credentials)
    );

    token_mock.assert_async().await;
    limits_mock.assert_async().await;
    assert_eq!(first.unwrap(), second.unwrap());
}

#[tokio::test]
async fn test_status_token_unreachable_never_contacts_registry() {
    let mut server = Server::new_async().await;
    let limits_mock = server
        .mock("HEAD", LIMITS_PATH)
        .expect(0)
        .create_async()
        .await;

    let urls = DockerHubUrls {
        token_url: "http://127.0.0.1:9/token".to_string(),
        rate_limits_url: format!("{}{}", server.url(), LIMITS_PATH),
    };
    let dockerhub = DockerHub::new(Client::new().unwrap(), urls);

    let err = dockerhub
        .status(&DockerHubCredentials::anonymous())
        .await
        .unwrap_err();

    match &err {
        HubStatError::UpstreamAuth {
            status_code,
            source,
            ..
        } => {
            assert_eq!(*status_code, None);
            assert!(source.is_some());
        }
        other => panic!("expected UpstreamAuth, got {other:?}"),
    }
    assert_eq!(err.http_status(), 500);
    assert!(!err.is_credentials_rejected());
    limits_mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_rate_limits_unreachable_registry() {
    let urls = DockerHubUrls {
        token_url: "http://127.0.0.1:9/token".to_string(),
        rate_limits_url: "http://127.0.0.1:9/v2/ratelimitpreview/test/manifests/latest"
            .to_string(),
    };
    let dockerhub = DockerHub::new(Client::new().unwrap(), urls);

    let err = dockerhub
        .fetch_rate_limits(&Token::new("abc123"))
        .await
        .unwrap_err();

    match &err {
        HubStatError::UpstreamRateLimit {
            status_code,
            source,
            ..
        } => {
            assert_eq!(*status_code, None);
            assert!(source.is_some());
        }
        other => panic!("expected UpstreamRateLimit, got {other:?}"),
    }
    assert!(err.source().is_some());
    assert_eq!(err.http_status(), 500);
}
