use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcmError {
    // Registration errors
    #[error("A host provider cannot be registered with the ID '{0}'")]
    ReservedProviderId(String),

    #[error("A host provider cannot be registered with the legacy authority ID '{0}'")]
    ReservedAuthorityId(String),

    // Resolution errors
    #[error("No host provider available to service this request.")]
    NoProviderAvailable,

    // Credential protocol errors
    #[error("Invalid credential input: {0}")]
    InvalidInput(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GcmError>;
