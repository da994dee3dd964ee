use std::{env::VarError, result};

use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot get secret: secret is not defined")]
    GetUndefinedSecretError,
    #[error("cannot get secret from environment variable {0}: variable is not set or empty")]
    GetSecretFromEnvEmptyError(String),
    #[error("cannot set secret read from environment variable {0}")]
    SetSecretFromEnvError(String),
    #[error("cannot set secret: secret is not defined")]
    SetUndefinedSecretError,
    #[error("cannot read secret from environment variable {1}")]
    ReadSecretFromEnvError(#[source] VarError, String),
}
