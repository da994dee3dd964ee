#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

pub mod address;
pub mod attachment;
pub mod backend;
pub mod config;
pub mod content;
mod error;
pub mod message;
pub mod payload;
pub mod status;

#[doc(inline)]
pub use self::{
    address::Address,
    attachment::{AttachmentEncoder, Disposition, EncodedAttachment, PayloadAttachment},
    backend::{HttpTransport, MailerSend, SendPayload},
    config::MailerSendConfig,
    content::Content,
    error::{Error, Result},
    message::{Alternative, Attachment, AttachmentContent, BodyKind, SourceMessage},
    payload::Payload,
    status::Status,
};
#[doc(inline)]
pub use secret::Secret;
