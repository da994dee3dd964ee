//! # Send status
//!
//! Module dedicated to the interpretation of the transport status.
//! The API answers `202 Accepted` when it accepts a message, any
//! other status counts as a failure.

use std::fmt;

use http::ureq::http::StatusCode;

/// The status code of an accepted message.
pub const ACCEPTED: &str = "202";

/// The textual status returned by the transport, for example `202
/// Accepted`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Status(String);

impl Status {
    pub fn new(status: impl ToString) -> Self {
        Self(status.to_string())
    }

    /// Returns `true` if the message has been accepted.
    pub fn is_accepted(&self) -> bool {
        interpret(&self.0) == 1
    }

    /// Returns the number of messages sent: 1 when accepted, 0
    /// otherwise.
    pub fn success_count(&self) -> usize {
        interpret(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        match code.canonical_reason() {
            Some(reason) => Self(format!("{} {reason}", code.as_str())),
            None => Self(code.as_str().to_owned()),
        }
    }
}

impl From<&str> for Status {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interprets the given textual status.
///
/// Returns 1 when its first three characters are `202`, 0 otherwise.
pub fn interpret(status: impl AsRef<str>) -> usize {
    let accepted = status.as_ref().chars().take(3).eq(ACCEPTED.chars());
    usize::from(accepted)
}
