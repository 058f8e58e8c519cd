pub mod env_file;
pub mod prompt;
pub mod resolve;
pub mod runtime;
pub mod store;
pub mod verify;

pub use resolve::Resolver;
pub use runtime::Runtime;
pub use store::KeyStore;
pub use verify::Verifier;

#[derive(Debug, thiserror::Error)]
pub enum KeygateError {
    #[error("Runtime error: {0}")]
    Runtime(#[from] runtime::RuntimeError),

    #[error("Key store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Verification error: {0}")]
    Verify(#[from] verify::VerifyError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] resolve::ResolveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KeygateError>;
