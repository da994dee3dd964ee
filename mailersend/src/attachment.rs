//! # Attachment encoding
//!
//! Module dedicated to attachment encoding. Each attachment gets a
//! filename, synthesized when missing, and its raw bytes which are
//! sent base64-encoded with an `attachment` disposition.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    Engine,
};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::{Attachment, AttachmentContent};

/// Prefix of synthesized filenames: `attachment-1`, `attachment-2`…
pub const NAMELESS_PREFIX: &str = "attachment";

/// Extensions preferred over the first one registered in
/// [`mime_guess`], which is not always the most common one.
const PREFERRED_EXTENSIONS: &[(&str, &str)] = &[
    ("text/plain", "txt"),
    ("text/html", "html"),
    ("text/csv", "csv"),
    ("text/calendar", "ics"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/svg+xml", "svg"),
    ("audio/mpeg", "mp3"),
    ("video/mp4", "mp4"),
    ("application/pdf", "pdf"),
    ("application/zip", "zip"),
    ("application/json", "json"),
    ("application/xml", "xml"),
    ("application/octet-stream", "bin"),
    ("message/rfc822", "eml"),
];

/// Decoder of MIME part payloads, which may come without padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The MIME disposition of an encoded attachment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    #[default]
    Attachment,
}

/// The attachment as sent to the API.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PayloadAttachment {
    pub filename: String,
    /// The base64-encoded content.
    pub content: String,
    pub disposition: Disposition,
}

/// The encoded attachment, before base64 encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl EncodedAttachment {
    pub fn to_payload(&self) -> PayloadAttachment {
        PayloadAttachment {
            filename: self.filename.clone(),
            content: STANDARD.encode(&self.content),
            disposition: Disposition::Attachment,
        }
    }
}

/// The attachment encoder.
///
/// The encoder counts nameless attachments, so one encoder must be
/// used per message: the first nameless attachment of a message is
/// always named `attachment-1`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttachmentEncoder {
    nameless: usize,
}

impl AttachmentEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes the given attachment.
    ///
    /// The nameless counter only moves when a filename needs to be
    /// synthesized.
    pub fn encode(&mut self, attachment: &Attachment) -> EncodedAttachment {
        match attachment {
            Attachment::Named { content, mime, .. } => {
                let bytes = content.as_bytes().to_vec();
                let filename = self.resolve_filename(attachment.filename(), || match mime {
                    Some(mime) => mime.clone(),
                    None => guess_content_type(content),
                });
                EncodedAttachment {
                    filename,
                    content: bytes,
                }
            }
            Attachment::MimePart {
                payload,
                content_type,
                charset,
                ..
            } => {
                let bytes = match charset {
                    Some(charset) => {
                        trace!(%charset, "text attachment, encoding payload as bytes");
                        payload.as_bytes().to_vec()
                    }
                    None => decode_base64(payload),
                };
                let filename =
                    self.resolve_filename(attachment.filename(), || content_type.clone());
                EncodedAttachment {
                    filename,
                    content: bytes,
                }
            }
        }
    }

    /// Encodes all the given attachments, keeping their order.
    pub fn encode_all(&mut self, attachments: &[Attachment]) -> Vec<EncodedAttachment> {
        attachments
            .iter()
            .map(|attachment| self.encode(attachment))
            .collect()
    }

    fn resolve_filename(
        &mut self,
        filename: Option<&str>,
        ctype: impl FnOnce() -> String,
    ) -> String {
        if let Some(filename) = filename {
            return filename.to_owned();
        }

        self.nameless += 1;
        let ctype = ctype();

        match guess_extension(&ctype) {
            Some(ext) => format!("{NAMELESS_PREFIX}-{}.{ext}", self.nameless),
            None => {
                debug!(%ctype, "cannot guess extension of nameless attachment");
                format!("{NAMELESS_PREFIX}-{}", self.nameless)
            }
        }
    }
}

/// Guesses a file extension, without the leading dot, from the given
/// content type. Parameters like `; charset=utf-8` are ignored.
pub fn guess_extension(ctype: &str) -> Option<&'static str> {
    let mime = ctype
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime.is_empty() {
        return None;
    }

    PREFERRED_EXTENSIONS
        .iter()
        .find(|(ctype, _)| *ctype == mime)
        .map(|(_, ext)| *ext)
        .or_else(|| {
            mime_guess::get_mime_extensions_str(&mime)
                .and_then(|exts| exts.first())
                .copied()
        })
}

fn guess_content_type(content: &AttachmentContent) -> String {
    let ctype = tree_magic_mini::from_u8(content.as_bytes());
    debug!("no content type found, guessing from content: {ctype}");
    ctype.to_owned()
}

/// Decodes a base64 payload, line breaks included, with or without
/// padding.
///
/// An invalid payload is not fatal: its raw bytes are used instead.
fn decode_base64(payload: &str) -> Vec<u8> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    match LENIENT.decode(compact) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("cannot decode base64 attachment, using raw payload: {err}");
            debug!("{err:?}");
            payload.as_bytes().to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Attachment;

    use super::{guess_extension, AttachmentEncoder, Disposition};

    #[test]
    fn explicit_filename() {
        let mut encoder = AttachmentEncoder::new();
        let encoded = encoder.encode(&Attachment::new("report.csv", "a,b\n1,2\n"));

        assert_eq!(encoded.filename, "report.csv");
        assert_eq!(encoded.content, b"a,b\n1,2\n");
    }

    #[test]
    fn nameless_filenames_are_dense() {
        let attachments = [
            Attachment::nameless("one").with_mime("text/plain"),
            Attachment::new("named.txt", "named"),
            Attachment::binary_part("SGVsbG8=", "application/pdf"),
            Attachment::new("other.txt", "other"),
            Attachment::nameless(vec![0u8, 1, 2]).with_mime("application/x-unknown-kind"),
        ];

        let filenames: Vec<_> = AttachmentEncoder::new()
            .encode_all(&attachments)
            .into_iter()
            .map(|encoded| encoded.filename)
            .collect();

        assert_eq!(
            filenames,
            [
                "attachment-1.txt",
                "named.txt",
                "attachment-2.pdf",
                "other.txt",
                "attachment-3",
            ]
        );
    }

    #[test]
    fn binary_part_is_decoded() {
        let encoded = AttachmentEncoder::new()
            .encode(&Attachment::binary_part("SGVsbG8=", "text/plain").with_filename("a.txt"));

        assert_eq!(encoded.content, b"Hello");
        assert_eq!(encoded.to_payload().content, "SGVsbG8=");
    }

    #[test]
    fn binary_part_with_line_breaks() {
        let encoded = AttachmentEncoder::new()
            .encode(&Attachment::binary_part("SGVs\r\nbG8=\r\n", "text/plain"));

        assert_eq!(encoded.content, b"Hello");
    }

    #[test]
    fn binary_part_without_padding() {
        let encoded = AttachmentEncoder::new()
            .encode(&Attachment::binary_part("SGVsbG8", "text/plain"));

        assert_eq!(encoded.content, b"Hello");
        assert_eq!(encoded.to_payload().content, "SGVsbG8=");
    }

    #[test]
    fn invalid_binary_part_falls_back_to_raw_payload() {
        let encoded = AttachmentEncoder::new()
            .encode(&Attachment::binary_part("not base64!", "text/plain"));

        assert_eq!(encoded.content, b"not base64!");
    }

    #[test]
    fn text_part_is_encoded() {
        let encoded = AttachmentEncoder::new()
            .encode(&Attachment::text_part("Héllo", "text/plain", "utf-8"));

        assert_eq!(encoded.filename, "attachment-1.txt");
        assert_eq!(encoded.content, "Héllo".as_bytes());
        assert_eq!(encoded.to_payload().content, "SMOpbGxv");
    }

    #[test]
    fn bytes_are_kept_as_is() {
        let bytes = vec![0xffu8, 0x00, 0x10];
        let encoded = AttachmentEncoder::new().encode(&Attachment::new("blob", bytes.clone()));

        assert_eq!(encoded.content, bytes);
    }

    #[test]
    fn payload() {
        let payload = AttachmentEncoder::new()
            .encode(&Attachment::new("hello.txt", "Hello"))
            .to_payload();

        assert_eq!(payload.filename, "hello.txt");
        assert_eq!(payload.content, "SGVsbG8=");
        assert_eq!(payload.disposition, Disposition::Attachment);

        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"filename":"hello.txt","content":"SGVsbG8=","disposition":"attachment"}"#
        );
    }

    #[test]
    fn extensions() {
        assert_eq!(guess_extension("text/plain"), Some("txt"));
        assert_eq!(guess_extension("text/plain; charset=utf-8"), Some("txt"));
        assert_eq!(guess_extension("Image/PNG"), Some("png"));
        assert_eq!(guess_extension("application/pdf"), Some("pdf"));
        assert_eq!(guess_extension("application/x-unknown-kind"), None);
        assert_eq!(guess_extension(""), None);
    }
}
