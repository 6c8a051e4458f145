//! Outbound mail as a fire-and-forget capability.
//!
//! Every implementation upholds one contract: `send` never fails. An
//! unconfigured transport, a bad address, or an SMTP rejection is logged with
//! the intended recipient and swallowed, so no call site can be affected by
//! delivery problems.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use tracing::warn;

use crate::config::SmtpConfig;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str);
}

/// Used when no SMTP host is configured; logs and drops every message.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, to: &str, _subject: &str, _body: &str) {
        warn!("mail transport not configured, dropping notification to {}", to);
    }
}

pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, lettre::transport::smtp::Error> {
        let mailer = if config.user.is_empty() {
            // Unauthenticated relay, e.g. a local development SMTP server.
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).build()
        } else {
            let creds = Credentials::new(config.user.clone(), config.password.clone());
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: from.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) {
        let from = match self.from.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!("invalid from address {}, dropping mail to {}: {}", self.from, to, e);
                return;
            }
        };
        let to_mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!("invalid recipient address {}: {}", to, e);
                return;
            }
        };

        let email = match Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
        {
            Ok(message) => message,
            Err(e) => {
                warn!("failed to build mail to {}: {}", to, e);
                return;
            }
        };

        if let Err(e) = self.mailer.send(email).await {
            warn!("failed to send mail to {}: {}", to, e);
        }
    }
}

/// Builds the process-wide notifier from config. Falls back to the no-op
/// sender when SMTP is unconfigured or the transport cannot be built.
pub fn from_config(smtp: Option<&SmtpConfig>, from: &str) -> Arc<dyn Notifier> {
    match smtp {
        Some(config) => match SmtpNotifier::new(config, from) {
            Ok(notifier) => Arc::new(notifier),
            Err(e) => {
                warn!("failed to build SMTP transport, mail disabled: {}", e);
                Arc::new(NoopNotifier)
            }
        },
        None => {
            warn!("SMTP_HOST not set, notifications disabled");
            Arc::new(NoopNotifier)
        }
    }
}

/// Records sent messages instead of delivering them; for tests.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: std::sync::Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
    }
}
