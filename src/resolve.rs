use crate::prompt::PromptInput;
use crate::store::{KeyStore, StoreError};
use crate::verify::Verifier;
use std::env;
use tracing::{info, warn};

pub const API_KEY_ENV_VAR: &str = "API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("API key from environment variable failed verification")]
    EnvKeyRejected,

    #[error("No API key entered")]
    EmptyInput,

    #[error("Entered API key failed verification")]
    KeyRejected,

    #[error("Key store error: {0}")]
    Store(#[from] StoreError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Resolves a working API key, in order: `API_KEY` environment variable,
/// stored key file, interactive prompt. Every candidate is verified remotely
/// before it is returned; only a freshly entered key is persisted.
pub struct Resolver {
    store: KeyStore,
    verifier: Verifier,
}

impl Resolver {
    pub fn new(store: KeyStore, verifier: Verifier) -> Self {
        Self { store, verifier }
    }

    /// One pass through the fallback chain, no retries. An invalid
    /// environment key is fatal; an invalid stored key falls through to the
    /// prompt.
    pub async fn ensure_key(
        &self,
        prompt: &mut dyn PromptInput,
    ) -> Result<String, ResolveError> {
        if let Some(key) = env_key() {
            info!("API key loaded from environment variable");
            if self.verifier.verify(&key).await {
                return Ok(key);
            }
            warn!("API key from environment variable is invalid, check your .env file");
            return Err(ResolveError::EnvKeyRejected);
        }

        if let Some(stored) = self.store.load()? {
            if self.verifier.verify(&stored).await {
                return Ok(stored);
            }
            println!("Existing API key is invalid. Please enter a new one.");
        }

        let entered = prompt
            .read_key()?
            .map(|k| k.trim().to_string())
            .unwrap_or_default();

        if entered.is_empty() {
            println!("API key tidak boleh kosong. Menutup aplikasi.");
            return Err(ResolveError::EmptyInput);
        }

        if !self.verifier.verify(&entered).await {
            println!("API key tidak valid. Menutup aplikasi.");
            self.store.delete()?;
            return Err(ResolveError::KeyRejected);
        }

        self.store.save(&entered)?;
        Ok(entered)
    }
}

// Any non-empty value is a candidate, whitespace included; it still has to
// pass verification, and a failure there is fatal.
fn env_key() -> Option<String> {
    env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty())
}
