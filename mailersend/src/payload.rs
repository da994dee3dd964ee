//! # Payload
//!
//! Module dedicated to the JSON payload of the MailerSend email
//! endpoint, built from a [`SourceMessage`].

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    address::{self, Address},
    attachment::{AttachmentEncoder, PayloadAttachment},
    content, Error, Result, SourceMessage,
};

/// The payload sent to the API.
///
/// Optional fields are omitted from the JSON object when unset, so
/// empty `cc`, `bcc` or `reply_to` never appear as empty arrays.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Payload {
    pub from: Address,
    pub to: Vec<Address>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<PayloadAttachment>>,
}

impl Payload {
    /// Builds the payload of the given message.
    ///
    /// Fails before touching anything else when the message has extra
    /// headers, or when its content types are not supported.
    pub fn build(msg: &SourceMessage) -> Result<Self> {
        info!(subject = %msg.subject, "building payload");

        if !msg.extra_headers.is_empty() {
            let names = msg.extra_headers.keys().cloned().collect();
            return Err(Error::UnsupportedHeadersError(names));
        }

        let content = content::negotiate(&msg.body_kind, &msg.body, &msg.alternatives)?;

        let mut payload = Self {
            from: Address::parse(&msg.from),
            to: address::parse_all(&msg.to),
            subject: msg.subject.clone(),
            cc: parse_non_empty(&msg.cc),
            bcc: parse_non_empty(&msg.bcc),
            reply_to: parse_non_empty(&msg.reply_to),
            text: content.text,
            html: content.html,
            attachments: None,
        };

        if !msg.attachments.is_empty() {
            let encoded = AttachmentEncoder::new().encode_all(&msg.attachments);
            debug!(count = encoded.len(), "attachments encoded");
            payload.attachments = Some(encoded.iter().map(|a| a.to_payload()).collect());
        }

        Ok(payload)
    }

    /// Serializes the payload to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::SerializePayloadError)
    }
}

impl TryFrom<&SourceMessage> for Payload {
    type Error = Error;

    fn try_from(msg: &SourceMessage) -> Result<Self> {
        Self::build(msg)
    }
}

fn parse_non_empty(raws: &[String]) -> Option<Vec<Address>> {
    if raws.is_empty() {
        None
    } else {
        Some(address::parse_all(raws))
    }
}
