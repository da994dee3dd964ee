#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

mod error;

use std::env::{self, VarError};

use tracing::debug;

#[doc(inline)]
pub use crate::error::{Error, Result};

/// The secret.
///
/// A secret can be retrieved either from a raw string or from an
/// environment variable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Secret {
    /// The secret is contained in a raw string, usually not safe to
    /// use and so not recommended.
    Raw(String),

    /// The secret is read from the environment variable of the given
    /// name.
    #[cfg_attr(feature = "derive", serde(alias = "environment"))]
    Env(String),

    /// The secret is not defined.
    #[default]
    #[cfg_attr(feature = "derive", serde(skip_serializing))]
    Undefined,
}

impl Secret {
    /// Creates a new secret from the given raw string.
    pub fn new_raw(secret: impl ToString) -> Self {
        Self::Raw(secret.to_string())
    }

    /// Creates a new secret read from the environment variable of the
    /// given name.
    pub fn new_env(name: impl ToString) -> Self {
        Self::Env(name.to_string())
    }

    /// Returns `true` if the secret is not defined.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Gets the secret value.
    ///
    /// Fails if the secret is undefined, or if the environment
    /// variable is not set or empty.
    pub fn get(&self) -> Result<String> {
        match (self.find()?, self) {
            (Some(secret), _) => Ok(secret),
            (None, Self::Env(name)) => Err(Error::GetSecretFromEnvEmptyError(name.clone())),
            (None, _) => Err(Error::GetUndefinedSecretError),
        }
    }

    /// Finds the secret value.
    ///
    /// Same as [`Secret::get`], except that an undefined secret or an
    /// unset environment variable gives `None`.
    pub fn find(&self) -> Result<Option<String>> {
        match self {
            Self::Raw(secret) => Ok(Some(secret.clone())),
            Self::Env(name) => match env::var(name) {
                Ok(secret) if secret.trim().is_empty() => {
                    debug!(%name, "environment variable is empty");
                    Ok(None)
                }
                Ok(secret) => Ok(Some(secret.trim().to_owned())),
                Err(VarError::NotPresent) => {
                    debug!(%name, "environment variable is not set");
                    Ok(None)
                }
                Err(err) => Err(Error::ReadSecretFromEnvError(err, name.clone())),
            },
            Self::Undefined => Ok(None),
        }
    }

    /// Replaces the raw secret value.
    ///
    /// Environment variables are never written, so only the raw
    /// variant can be changed.
    pub fn set(&mut self, secret: impl ToString) -> Result<String> {
        match self {
            Self::Raw(raw) => {
                *raw = secret.to_string();
                Ok(raw.clone())
            }
            Self::Env(name) => Err(Error::SetSecretFromEnvError(name.clone())),
            Self::Undefined => Err(Error::SetUndefinedSecretError),
        }
    }

    /// Forgets the secret, which becomes undefined.
    pub fn delete(&mut self) {
        *self = Self::Undefined;
    }
}
