//! # Content negotiation
//!
//! Module dedicated to content negotiation between the primary body
//! of a message and its alternatives. The result is a [`Content`],
//! which holds at most one plain text and one HTML representation.

use tracing::{debug, trace};

use crate::{Alternative, BodyKind, Error, Result};

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";

/// The negotiated content.
///
/// After a successful negotiation, at least one of the two fields is
/// set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Content {
    pub text: Option<String>,
    pub html: Option<String>,
}

impl Content {
    /// Sets the slot matching the given MIME type, which must be
    /// either `text/plain` or `text/html` (case-insensitive).
    ///
    /// Returns `false` when the MIME type is not supported.
    fn set(&mut self, mime: &str, content: &str) -> bool {
        let mime = mime.trim();

        let slot = if mime.eq_ignore_ascii_case(TEXT_PLAIN) {
            &mut self.text
        } else if mime.eq_ignore_ascii_case(TEXT_HTML) {
            &mut self.html
        } else {
            return false;
        };

        if slot.is_some() {
            trace!(mime, "overriding content");
        }

        *slot = Some(content.to_owned());
        true
    }
}

/// Negotiates the content of a message.
///
/// The primary body fills the slot matching its kind, then
/// alternatives are merged in order: they can fill the other slot or
/// override an already set one, the last one winning.
pub fn negotiate(kind: &BodyKind, body: &str, alternatives: &[Alternative]) -> Result<Content> {
    let mut content = Content::default();

    match kind.mime() {
        Some(mime) => {
            content.set(mime, body);
        }
        None => return Err(Error::UnsupportedBodyKindError(kind.to_string())),
    }

    for alt in alternatives {
        if !content.set(&alt.mime, &alt.content) {
            return Err(Error::UnsupportedAlternativeContentTypeError(
                alt.mime.clone(),
            ));
        }
    }

    debug!(
        text = content.text.is_some(),
        html = content.html.is_some(),
        "content negotiated"
    );

    Ok(content)
}
