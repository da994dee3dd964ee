//! # Source message
//!
//! Module dedicated to the generic email message given to the
//! library. A [`SourceMessage`] is never mutated by the conversion:
//! it is read once per send, then turned into a
//! [`Payload`](crate::Payload).

use std::{collections::BTreeMap, convert::Infallible, fmt, str::FromStr};

/// The kind of the primary body of a message.
///
/// Only [`BodyKind::Plain`] and [`BodyKind::Html`] can be sent,
/// other subtypes are kept so that they can be reported.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum BodyKind {
    #[default]
    Plain,
    Html,
    Other(String),
}

impl BodyKind {
    /// The MIME type matching the body kind, if supported.
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            Self::Plain => Some(crate::content::TEXT_PLAIN),
            Self::Html => Some(crate::content::TEXT_HTML),
            Self::Other(_) => None,
        }
    }
}

impl FromStr for BodyKind {
    type Err = Infallible;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        Ok(match kind {
            "plain" => Self::Plain,
            "html" => Self::Html,
            kind => Self::Other(kind.to_owned()),
        })
    }
}

impl From<&str> for BodyKind {
    fn from(kind: &str) -> Self {
        match kind.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<String> for BodyKind {
    fn from(kind: String) -> Self {
        kind.as_str().into()
    }
}

impl From<BodyKind> for String {
    fn from(kind: BodyKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Html => write!(f, "html"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// An alternative representation of the primary body.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub struct Alternative {
    /// The alternative content.
    pub content: String,

    /// The MIME type of the content, for example `text/html`.
    pub mime: String,
}

impl Alternative {
    pub fn new(content: impl ToString, mime: impl ToString) -> Self {
        Self {
            content: content.to_string(),
            mime: mime.to_string(),
        }
    }
}

/// The raw content of a named attachment.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum AttachmentContent {
    Bytes(Vec<u8>),
    Text(String),
}

impl AttachmentContent {
    /// Returns the content as bytes, text being UTF-8 encoded.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }
}

impl From<Vec<u8>> for AttachmentContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for AttachmentContent {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for AttachmentContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AttachmentContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// The message attachment.
///
/// An attachment comes in one of two shapes: a named attachment made
/// of a filename, a raw content and an optional MIME type, or a MIME
/// part whose payload is either base64 text (no charset) or plain
/// text (with a charset).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", rename_all_fields = "kebab-case")
)]
pub enum Attachment {
    Named {
        filename: Option<String>,
        content: AttachmentContent,
        mime: Option<String>,
    },
    MimePart {
        filename: Option<String>,
        payload: String,
        content_type: String,
        charset: Option<String>,
    },
}

impl Attachment {
    /// Creates a named attachment from the given filename and
    /// content.
    pub fn new(filename: impl ToString, content: impl Into<AttachmentContent>) -> Self {
        Self::Named {
            filename: Some(filename.to_string()),
            content: content.into(),
            mime: None,
        }
    }

    /// Creates a named attachment without filename.
    pub fn nameless(content: impl Into<AttachmentContent>) -> Self {
        Self::Named {
            filename: None,
            content: content.into(),
            mime: None,
        }
    }

    /// Creates a binary MIME part from the given base64 payload.
    pub fn binary_part(payload: impl ToString, content_type: impl ToString) -> Self {
        Self::MimePart {
            filename: None,
            payload: payload.to_string(),
            content_type: content_type.to_string(),
            charset: None,
        }
    }

    /// Creates a text MIME part from the given payload and charset.
    pub fn text_part(
        payload: impl ToString,
        content_type: impl ToString,
        charset: impl ToString,
    ) -> Self {
        Self::MimePart {
            filename: None,
            payload: payload.to_string(),
            content_type: content_type.to_string(),
            charset: Some(charset.to_string()),
        }
    }

    pub fn with_filename(mut self, name: impl ToString) -> Self {
        match &mut self {
            Self::Named { filename, .. } | Self::MimePart { filename, .. } => {
                *filename = Some(name.to_string())
            }
        }
        self
    }

    pub fn with_mime(mut self, ctype: impl ToString) -> Self {
        match &mut self {
            Self::Named { mime, .. } => *mime = Some(ctype.to_string()),
            Self::MimePart { content_type, .. } => *content_type = ctype.to_string(),
        }
        self
    }

    /// The explicit filename of the attachment, if any.
    ///
    /// An empty filename is considered as missing.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Named { filename, .. } | Self::MimePart { filename, .. } => {
                filename.as_deref().filter(|name| !name.is_empty())
            }
        }
    }
}

/// The generic email message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", default)
)]
pub struct SourceMessage {
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,

    /// Zero, one or many reply-to addresses.
    pub reply_to: Vec<String>,

    pub body: String,
    pub body_kind: BodyKind,
    pub alternatives: Vec<Alternative>,
    pub attachments: Vec<Attachment>,

    /// Extra headers, which cannot be sent through the API.
    pub extra_headers: BTreeMap<String, String>,
}

impl SourceMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new message whose primary body is HTML.
    pub fn html(body: impl ToString) -> Self {
        Self::new().with_body(body).with_body_kind(BodyKind::Html)
    }

    pub fn with_subject(mut self, subject: impl ToString) -> Self {
        self.subject = subject.to_string();
        self
    }

    pub fn with_from(mut self, from: impl ToString) -> Self {
        self.from = from.to_string();
        self
    }

    pub fn with_to(mut self, to: impl IntoIterator<Item = impl ToString>) -> Self {
        self.to = to.into_iter().map(|addr| addr.to_string()).collect();
        self
    }

    pub fn with_cc(mut self, cc: impl IntoIterator<Item = impl ToString>) -> Self {
        self.cc = cc.into_iter().map(|addr| addr.to_string()).collect();
        self
    }

    pub fn with_bcc(mut self, bcc: impl IntoIterator<Item = impl ToString>) -> Self {
        self.bcc = bcc.into_iter().map(|addr| addr.to_string()).collect();
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl IntoIterator<Item = impl ToString>) -> Self {
        self.reply_to = reply_to.into_iter().map(|addr| addr.to_string()).collect();
        self
    }

    pub fn with_body(mut self, body: impl ToString) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn with_body_kind(mut self, kind: impl Into<BodyKind>) -> Self {
        self.body_kind = kind.into();
        self
    }

    pub fn with_alternative(mut self, content: impl ToString, mime: impl ToString) -> Self {
        self.alternatives.push(Alternative::new(content, mime));
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_header(mut self, key: impl ToString, val: impl ToString) -> Self {
        self.extra_headers.insert(key.to_string(), val.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Attachment, BodyKind};

    #[test]
    fn body_kind_from_str() {
        assert_eq!(BodyKind::from("plain"), BodyKind::Plain);
        assert_eq!(BodyKind::from("html"), BodyKind::Html);
        assert_eq!(
            BodyKind::from("markdown"),
            BodyKind::Other("markdown".into())
        );
        assert_eq!(BodyKind::from("markdown").to_string(), "markdown");
    }

    #[test]
    fn empty_filename_is_missing() {
        let attachment = Attachment::new("", "content");
        assert_eq!(attachment.filename(), None);

        let attachment = Attachment::binary_part("SGVsbG8=", "text/plain").with_filename("a.txt");
        assert_eq!(attachment.filename(), Some("a.txt"));
    }
}
