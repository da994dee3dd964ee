//! Sends a message through the MailerSend API.
//!
//! The token is read from `MAILERSEND_API_TOKEN`, the sender and the
//! recipient from `MAILERSEND_FROM` and `MAILERSEND_TO`.

use std::env;

use mailersend::{Attachment, MailerSend, MailerSendConfig, SourceMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let from = env::var("MAILERSEND_FROM").expect("MAILERSEND_FROM should be set");
    let to = env::var("MAILERSEND_TO").expect("MAILERSEND_TO should be set");

    let mailersend = MailerSend::new(MailerSendConfig::from_env()).unwrap();

    let msg = SourceMessage::new()
        .with_from(from)
        .with_to([to])
        .with_subject("Hello from mailersend-lib")
        .with_body("Hello, world!")
        .with_alternative("<p>Hello, <b>world</b>!</p>", "text/html")
        .with_attachment(Attachment::new("hello.txt", "Hello, world!"));

    let sent = mailersend.send_message(&msg).await.unwrap();
    println!("messages sent: {sent}");
}
