//! Outbound email for ambassador notices.
//!
//! The dispatcher talks to a [`Mailer`], not to SMTP directly. Production
//! wires in [`SmtpMailer`] (lettre, async, STARTTLS); when `SMTP_HOST` is
//! absent [`EmailConfig::from_env`] yields `None` and the server falls back
//! to [`NoopMailer`], so local development never needs a mail server.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use nextif_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// What can go wrong between "send this notice" and the SMTP server
/// accepting it.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The SMTP conversation failed: connect, auth, or submission.
    #[error("smtp transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient mailbox did not parse.
    #[error("bad email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself could not be assembled.
    #[error("could not build message: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// STARTTLS submission port, used when `SMTP_PORT` is absent.
const DEFAULT_SMTP_PORT: u16 = 587;

/// Sender mailbox used when `SMTP_FROM` is absent.
const DEFAULT_FROM_ADDRESS: &str = "NextIF <noreply@nextif.local>";

/// SMTP relay settings, read once at startup.
///
/// `SMTP_HOST` is the switch: set it and email goes out; leave it unset and
/// the portal runs without a mailer. `SMTP_PORT`, `SMTP_FROM`, `SMTP_USER`,
/// and `SMTP_PASSWORD` refine the relay when present.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 mailbox placed in the `From:` header.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Read the relay settings from the environment, or `None` when
    /// `SMTP_HOST` is unset.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_owned());

        Some(Self {
            smtp_host,
            smtp_port,
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Outbound mail seam used by the notification dispatcher.
///
/// Failures surface as [`EmailError`]; the dispatcher logs them and moves
/// on. A mail failure must never propagate into request handling.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Notify an ambassador that a new task has been assigned to them.
    async fn send_task_assigned(
        &self,
        to: &str,
        first_name: &str,
        task_title: &str,
        due_date: Timestamp,
    ) -> Result<(), EmailError>;

    /// Notify an ambassador that their submission was sent back for redo.
    async fn send_task_redo(
        &self,
        to: &str,
        first_name: &str,
        task_title: &str,
        remark: &str,
        new_due_date: Timestamp,
    ) -> Result<(), EmailError>;
}

/// Strftime pattern for due dates rendered into email bodies.
const DUE_DATE_FORMAT: &str = "%d %b %Y, %H:%M UTC";

/// Build the subject and plain-text body for an assignment notice.
fn assigned_email(first_name: &str, task_title: &str, due_date: Timestamp) -> (String, String) {
    let subject = format!("New Task Assigned: {task_title}");
    let body = format!(
        "Hello {first_name},\n\n\
         A new task has been assigned to you on the NextIF Ambassador Portal.\n\n\
         Title: {task_title}\n\
         Due date: {}\n\n\
         Please log in to your dashboard to view the full details and start working on it.\n\n\
         Best regards,\n\
         The NextIF Team\n",
        due_date.format(DUE_DATE_FORMAT)
    );
    (subject, body)
}

/// Build the subject and plain-text body for a redo notice.
fn redo_email(
    first_name: &str,
    task_title: &str,
    remark: &str,
    new_due_date: Timestamp,
) -> (String, String) {
    let subject = format!("Action Required: Redo for {task_title}");
    let body = format!(
        "Hello {first_name},\n\n\
         The admin has reviewed your submission for \"{task_title}\" and requested some changes.\n\n\
         Admin remark: \"{remark}\"\n\
         New due date: {}\n\n\
         Please address the feedback and resubmit the task by the new deadline.\n\n\
         Best regards,\n\
         The NextIF Team\n",
        new_due_date.format(DUE_DATE_FORMAT)
    );
    (subject, body)
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// [`Mailer`] that submits notices to a real SMTP relay.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Assemble one plain-text message and hand it to the relay.
    async fn send_plain(
        &self,
        to_email: &str,
        subject: &str,
        body: String,
    ) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let relay = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?;
        let mut builder = relay.port(self.config.smtp_port);
        if let (Some(user), Some(password)) = (&self.config.smtp_user, &self.config.smtp_password)
        {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        builder.build().send(message).await?;
        tracing::info!(to = to_email, subject, "Email dispatched");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_task_assigned(
        &self,
        to: &str,
        first_name: &str,
        task_title: &str,
        due_date: Timestamp,
    ) -> Result<(), EmailError> {
        let (subject, body) = assigned_email(first_name, task_title, due_date);
        self.send_plain(to, &subject, body).await
    }

    async fn send_task_redo(
        &self,
        to: &str,
        first_name: &str,
        task_title: &str,
        remark: &str,
        new_due_date: Timestamp,
    ) -> Result<(), EmailError> {
        let (subject, body) = redo_email(first_name, task_title, remark, new_due_date);
        self.send_plain(to, &subject, body).await
    }
}

// ---------------------------------------------------------------------------
// NoopMailer
// ---------------------------------------------------------------------------

/// Mailer used when SMTP is not configured. Logs and drops every message.
#[derive(Debug, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_task_assigned(
        &self,
        to: &str,
        _first_name: &str,
        task_title: &str,
        _due_date: Timestamp,
    ) -> Result<(), EmailError> {
        tracing::debug!(to, task_title, "SMTP not configured, dropping assignment notice");
        Ok(())
    }

    async fn send_task_redo(
        &self,
        to: &str,
        _first_name: &str,
        task_title: &str,
        _remark: &str,
        _new_due_date: Timestamp,
    ) -> Result<(), EmailError> {
        tracing::debug!(to, task_title, "SMTP not configured, dropping redo notice");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
