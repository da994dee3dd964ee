#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

mod error;

use tracing::{debug, info};
pub use ureq;
use ureq::{
    config::Config,
    http::{Response, Uri},
    tls::{RootCerts, TlsConfig, TlsProvider},
    Agent, Body,
};

#[doc(inline)]
pub use crate::error::{Error, Result};

#[cfg(any(
    all(feature = "tokio", feature = "async-std"),
    not(any(feature = "tokio", feature = "async-std"))
))]
compile_error!("Either feature `tokio` or `async-std` must be enabled for this crate.");

#[cfg(any(
    all(feature = "rustls", feature = "native-tls"),
    not(any(feature = "rustls", feature = "native-tls"))
))]
compile_error!("Either feature `rustls` or `native-tls` must be enabled for this crate.");

/// The HTTP client structure.
///
/// This structure wraps a HTTP agent, which is used by the
/// [`Client::post_json`] function.
///
/// The agent does not treat 4xx and 5xx statuses as errors: callers
/// receive the response and decide what the status means.
#[derive(Clone, Debug)]
pub struct Client {
    /// The HTTP agent used to perform calls.
    agent: Agent,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new HTTP client with sane defaults.
    pub fn new() -> Self {
        let tls = TlsConfig::builder()
            .root_certs(RootCerts::PlatformVerifier)
            .provider(
                #[cfg(feature = "native-tls")]
                TlsProvider::NativeTls,
                #[cfg(feature = "rustls")]
                TlsProvider::Rustls,
            );

        let config = Config::builder()
            .tls_config(tls.build())
            .http_status_as_error(false)
            .build();
        let agent = config.new_agent();

        Self { agent }
    }

    /// Sends a JSON body to the given URI using the POST method,
    /// authenticated with the given bearer token.
    pub async fn post_json(
        &self,
        uri: Uri,
        token: impl AsRef<str>,
        body: impl ToString,
    ) -> Result<Response<Body>> {
        info!(%uri, "sending POST request");

        let agent = self.agent.clone();
        let auth = bearer(token);
        let body = body.to_string();
        let target = uri.clone();

        let res = spawn_blocking(move || {
            agent
                .post(target)
                .header("Authorization", auth)
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .send(body)
        })
        .await?
        .map_err(|err| Error::SendPostRequestError(err, uri))?;

        debug!(status = %res.status(), "received response");
        Ok(res)
    }
}

fn bearer(token: impl AsRef<str>) -> String {
    format!("Bearer {}", token.as_ref().trim())
}

/// Spawns a blocking task using [`async_std`].
#[cfg(feature = "async-std")]
async fn spawn_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(async_std::task::spawn_blocking(f).await)
}

/// Spawns a blocking task using [`tokio`].
#[cfg(feature = "tokio")]
async fn spawn_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}
