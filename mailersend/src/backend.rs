//! # Backend
//!
//! Module dedicated to message sending. The [`MailerSend`] backend
//! converts messages to payloads, then hands them to a
//! [`SendPayload`] transport and interprets the returned status.

use async_trait::async_trait;
use http::ureq::http::Uri;
use tracing::{debug, info, warn};

use crate::{Error, MailerSendConfig, Payload, Result, SourceMessage, Status};

/// The transport able to deliver a payload to the API.
#[async_trait]
pub trait SendPayload: Send + Sync {
    /// Sends the given payload authenticated with the given bearer
    /// token, and returns the textual status of the answer.
    async fn send_payload(&self, token: &str, payload: &Payload) -> Result<Status>;
}

/// The HTTP transport, based on [`http::Client`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: http::Client,
    uri: Uri,
}

impl HttpTransport {
    pub fn new(uri: Uri) -> Self {
        Self {
            client: http::Client::new(),
            uri,
        }
    }

    /// Creates a transport sending payloads to the given URL.
    pub fn try_from_url(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let uri = url
            .parse::<Uri>()
            .map_err(|err| Error::ParseApiUrlError(err, url.to_owned()))?;
        Ok(Self::new(uri))
    }
}

#[async_trait]
impl SendPayload for HttpTransport {
    async fn send_payload(&self, token: &str, payload: &Payload) -> Result<Status> {
        let body = payload.to_json()?;

        let res = self
            .client
            .post_json(self.uri.clone(), token, body)
            .await
            .map_err(Error::SendPayloadError)?;

        Ok(Status::from(res.status()))
    }
}

/// The MailerSend backend.
pub struct MailerSend<T: SendPayload = HttpTransport> {
    config: MailerSendConfig,
    transport: T,
}

impl MailerSend {
    /// Creates a new backend sending messages over HTTP to the
    /// configured API URL.
    pub fn new(config: MailerSendConfig) -> Result<Self> {
        let transport = HttpTransport::try_from_url(config.api_url())?;
        Ok(Self { config, transport })
    }
}

impl<T: SendPayload> MailerSend<T> {
    /// Creates a new backend using a custom transport.
    pub fn with_transport(config: MailerSendConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &MailerSendConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the given message.
    ///
    /// Returns the number of messages accepted by the API: 1 or 0.
    /// Conversion errors and token errors are returned before
    /// anything is sent, whereas a transport failure counts as a
    /// rejected message.
    pub async fn send_message(&self, msg: &SourceMessage) -> Result<usize> {
        let payload = Payload::build(msg)?;
        let token = self
            .config
            .api_token
            .get()
            .map_err(Error::GetApiTokenError)?;

        let status = match self.transport.send_payload(&token, &payload).await {
            Ok(status) => status,
            Err(err) => {
                warn!("cannot send message, counting it as rejected: {err}");
                debug!("{err:?}");
                return Ok(0);
            }
        };

        let count = status.success_count();

        if count == 0 {
            warn!(%status, "message rejected by MailerSend");
        } else {
            info!(%status, "message accepted by MailerSend");
        }

        Ok(count)
    }

    /// Sends the given messages one after the other.
    ///
    /// Returns the total number of accepted messages. The first
    /// conversion error stops the batch.
    pub async fn send_messages<'a>(
        &self,
        msgs: impl IntoIterator<Item = &'a SourceMessage>,
    ) -> Result<usize> {
        let mut total = 0;

        for msg in msgs {
            total += self.send_message(msg).await?;
        }

        debug!(total, "messages sent");
        Ok(total)
    }
}
