use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "https://crypto.mashu.lol/api/verify";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Verification endpoint rejected key (status {0})")]
    Rejected(StatusCode),

    #[error("Verification request failed: {0}")]
    Transport(String),

    #[error("Malformed verification response: {0}")]
    Decode(String),
}

/// Identity metadata returned by the verification endpoint for a valid key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyIdentity {
    #[serde(default)]
    pub user_id: serde_json::Value,
    #[serde(default)]
    pub username: String,
}

impl KeyIdentity {
    /// The identifier as plain text, whether the endpoint sent a number or a
    /// string.
    pub fn id_display(&self) -> String {
        match &self.user_id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Checks a candidate key against the remote verification endpoint with a
/// single GET. No retries: a transport failure reads the same as a rejected
/// key.
pub struct Verifier {
    client: reqwest::Client,
    endpoint: String,
}

impl Verifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VerifyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn with_defaults() -> Result<Self, VerifyError> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// GET `{endpoint}?key={key}`. Only HTTP 200 with a decodable body counts
    /// as valid.
    pub async fn check(&self, key: &str) -> Result<KeyIdentity, VerifyError> {
        debug!("Verifying key against {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|e| VerifyError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VerifyError::Rejected(status));
        }

        response
            .json::<KeyIdentity>()
            .await
            .map_err(|e| VerifyError::Decode(e.to_string()))
    }

    /// Collapses every failure to `false`; reports the key owner on success.
    pub async fn verify(&self, key: &str) -> bool {
        match self.check(key).await {
            Ok(identity) => {
                println!(
                    "API key is valid.\nId: {}\nOwner: @{}",
                    identity.id_display(),
                    identity.username
                );
                true
            }
            Err(VerifyError::Rejected(status)) => {
                warn!("API key is invalid, server responded with status {}", status);
                false
            }
            Err(e) => {
                warn!("Failed to verify API key: {}", e);
                false
            }
        }
    }
}
