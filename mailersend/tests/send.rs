use std::sync::Mutex;

use async_trait::async_trait;
use mailersend::{
    MailerSend, MailerSendConfig, Payload, Result, Secret, SendPayload, SourceMessage, Status,
};

/// Transport answering with predefined statuses and recording what
/// it receives.
struct RecordingTransport {
    statuses: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<(String, Payload)>>,
}

impl RecordingTransport {
    fn new(statuses: impl IntoIterator<Item = &'static str>) -> Self {
        let mut statuses: Vec<_> = statuses.into_iter().collect();
        statuses.reverse();

        Self {
            statuses: Mutex::new(statuses),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, Payload)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SendPayload for RecordingTransport {
    async fn send_payload(&self, token: &str, payload: &Payload) -> Result<Status> {
        self.sent
            .lock()
            .unwrap()
            .push((token.to_owned(), payload.clone()));

        let status = self.statuses.lock().unwrap().pop().unwrap_or("500");
        Ok(Status::new(status))
    }
}

fn config() -> MailerSendConfig {
    MailerSendConfig::new(Secret::new_raw("mlsn.token"))
}

fn message(subject: &str) -> SourceMessage {
    SourceMessage::new()
        .with_from("Alice <alice@example.com>")
        .with_to(["bob@example.com"])
        .with_subject(subject)
        .with_body("Hello")
}

#[test_log::test(tokio::test)]
async fn accepted() {
    let transport = RecordingTransport::new(["202 Accepted"]);
    let mailersend = MailerSend::with_transport(config(), transport);

    let count = mailersend.send_message(&message("accepted")).await.unwrap();
    assert_eq!(count, 1);

    let sent = mailersend_sent(&mailersend);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "mlsn.token");
    assert_eq!(sent[0].1.subject, "accepted");
}

#[test_log::test(tokio::test)]
async fn rejected() {
    let transport = RecordingTransport::new(["422 Unprocessable Entity"]);
    let mailersend = MailerSend::with_transport(config(), transport);

    let count = mailersend.send_message(&message("rejected")).await.unwrap();
    assert_eq!(count, 0);
}

#[test_log::test(tokio::test)]
async fn batch() {
    let transport = RecordingTransport::new(["202 Accepted", "500 Internal Server Error", "202"]);
    let mailersend = MailerSend::with_transport(config(), transport);

    let msgs = [message("one"), message("two"), message("three")];
    let count = mailersend.send_messages(&msgs).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(mailersend_sent(&mailersend).len(), 3);
}

#[test_log::test(tokio::test)]
async fn conversion_error_is_raised_before_sending() {
    let mailersend = MailerSend::with_transport(config(), RecordingTransport::new(["202"]));

    let msg = message("headers").with_header("X-Priority", "1");
    let err = mailersend.send_message(&msg).await.unwrap_err();

    assert!(err.is_unsupported_headers());
    assert!(mailersend_sent(&mailersend).is_empty());
}

#[test_log::test(tokio::test)]
async fn batch_stops_at_first_conversion_error() {
    let mailersend =
        MailerSend::with_transport(config(), RecordingTransport::new(["202", "202", "202"]));

    let msgs = [
        message("one"),
        message("two").with_body_kind("markdown"),
        message("three"),
    ];
    let err = mailersend.send_messages(&msgs).await.unwrap_err();

    assert!(err.is_unsupported_content_type());
    assert_eq!(mailersend_sent(&mailersend).len(), 1);
}

#[test_log::test(tokio::test)]
async fn undefined_token() {
    let config = MailerSendConfig::new(Secret::Undefined);
    let mailersend = MailerSend::with_transport(config, RecordingTransport::new(["202"]));

    let err = mailersend.send_message(&message("token")).await.unwrap_err();

    assert!(matches!(err, mailersend::Error::GetApiTokenError(_)));
    assert!(mailersend_sent(&mailersend).is_empty());
}

#[test_log::test(async_std::test)]
async fn async_std_runtime() {
    let mailersend = MailerSend::with_transport(config(), RecordingTransport::new(["202"]));
    assert_eq!(mailersend.send_message(&message("async-std")).await.unwrap(), 1);
}

fn mailersend_sent(mailersend: &MailerSend<RecordingTransport>) -> Vec<(String, Payload)> {
    mailersend.transport().sent()
}
