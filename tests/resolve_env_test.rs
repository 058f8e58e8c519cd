//! Environment-variable resolution scenarios. These mutate the real
//! `API_KEY` variable, so they live in their own test binary and run as a
//! single sequential test.

use keygate::prompt::PromptInput;
use keygate::resolve::{Resolver, ResolveError};
use keygate::store::KeyStore;
use keygate::verify::Verifier;
use std::env;
use std::io;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NoPrompt;

impl PromptInput for NoPrompt {
    fn read_key(&mut self) -> io::Result<Option<String>> {
        panic!("prompt must not be reached when API_KEY is set");
    }
}

#[tokio::test]
async fn test_env_key_scenarios() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify"))
        .and(query_param("key", "env-good"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"user_id": "7", "username": "owner"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/verify"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let endpoint = format!("{}/api/verify", server.uri());
    let temp_dir = TempDir::new().unwrap();
    let key_path = temp_dir.path().join("api.key");

    let resolver = Resolver::new(
        KeyStore::new(key_path.clone()),
        Verifier::new(endpoint, Duration::from_secs(5)).unwrap(),
    );

    // Valid env key wins and is never persisted
    env::set_var("API_KEY", "env-good");
    let key = resolver.ensure_key(&mut NoPrompt).await.unwrap();
    assert_eq!(key, "env-good");
    assert!(!key_path.exists());

    // Invalid env key is fatal, with no fallthrough to the stored key
    let store = KeyStore::new(key_path.clone());
    store.save("stored-key").unwrap();

    env::set_var("API_KEY", "env-bad");
    let err = resolver.ensure_key(&mut NoPrompt).await.unwrap_err();
    assert!(matches!(err, ResolveError::EnvKeyRejected));
    assert_eq!(store.load().unwrap(), Some("stored-key".to_string()));

    // A whitespace-only env key is still a candidate, not absence: it goes
    // to verification and its rejection is fatal, with no fallthrough
    env::set_var("API_KEY", "  ");
    let err = resolver.ensure_key(&mut NoPrompt).await.unwrap_err();
    assert!(matches!(err, ResolveError::EnvKeyRejected));
    assert_eq!(store.load().unwrap(), Some("stored-key".to_string()));

    env::remove_var("API_KEY");
}
