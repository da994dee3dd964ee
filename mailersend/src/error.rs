use std::result;

use http::ureq::http::uri::InvalidUri;
use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build payload: extra headers are not supported ({})", .0.join(", "))]
    UnsupportedHeadersError(Vec<String>),
    #[error("cannot negotiate content: body kind {0} is not supported")]
    UnsupportedBodyKindError(String),
    #[error("cannot negotiate content: alternative content type {0} is not supported")]
    UnsupportedAlternativeContentTypeError(String),

    #[error("cannot parse MailerSend API URL {1}")]
    ParseApiUrlError(#[source] InvalidUri, String),
    #[error("cannot get MailerSend API token")]
    GetApiTokenError(#[source] secret::Error),
    #[error("cannot serialize payload to JSON")]
    SerializePayloadError(#[source] serde_json::Error),
    #[error("cannot send payload to MailerSend API")]
    SendPayloadError(#[source] http::Error),
}

impl Error {
    /// Returns `true` if the error comes from an unsupported primary
    /// body kind or an unsupported alternative content type.
    pub fn is_unsupported_content_type(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedBodyKindError(_) | Self::UnsupportedAlternativeContentTypeError(_)
        )
    }

    /// Returns `true` if the error comes from non-empty extra
    /// headers.
    pub fn is_unsupported_headers(&self) -> bool {
        matches!(self, Self::UnsupportedHeadersError(_))
    }
}
