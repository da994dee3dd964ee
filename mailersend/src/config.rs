//! # Configuration
//!
//! Module dedicated to the MailerSend configuration. The API token is
//! a [`Secret`], resolved at send time.

use std::env;

use secret::Secret;

/// The default MailerSend email endpoint.
pub const DEFAULT_API_URL: &str = "https://api.mailersend.com/v1/email";

/// The environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "MAILERSEND_API_TOKEN";

/// The environment variable overriding the API URL.
pub const API_URL_ENV: &str = "MAILERSEND_API_URL";

/// The MailerSend configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub struct MailerSendConfig {
    /// The URL of the email endpoint.
    ///
    /// Defaults to [`DEFAULT_API_URL`].
    pub api_url: Option<String>,

    /// The API token sent as bearer token.
    pub api_token: Secret,
}

impl MailerSendConfig {
    pub fn new(api_token: Secret) -> Self {
        Self {
            api_url: None,
            api_token,
        }
    }

    /// Builds a configuration from the environment.
    ///
    /// The token is not read yet: it is read from
    /// `MAILERSEND_API_TOKEN` each time a message is sent.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var(API_URL_ENV).ok().filter(|url| !url.trim().is_empty()),
            api_token: Secret::new_env(API_TOKEN_ENV),
        }
    }

    pub fn with_api_url(mut self, url: impl ToString) -> Self {
        self.api_url = Some(url.to_string());
        self
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}
