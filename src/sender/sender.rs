//! Sender module.
//!
//! This module contains the sender interface, the sender builder and
//! the wrapper replacing real senders by the file sender while
//! developing.

use log::{debug, info};
use std::result;
use thiserror::Error;

use crate::{email, Email, Env, FileSender, FileSenderConfig, Sendmail, SendmailConfig};

use super::{file, sendmail};

#[cfg(feature = "smtp-sender")]
use crate::{smtp, Smtp, SmtpConfig};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build email sender: sender is not defined")]
    BuildEmailSenderMissingError,

    #[error(transparent)]
    EmailError(#[from] email::Error),
    #[error(transparent)]
    FileSenderError(#[from] file::Error),
    #[error(transparent)]
    SendmailError(#[from] sendmail::Error),
    #[cfg(feature = "smtp-sender")]
    #[error(transparent)]
    SmtpError(#[from] smtp::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub trait Sender {
    fn send(&mut self, email: &Email) -> Result<()>;
}

impl<S: Sender + ?Sized> Sender for Box<S> {
    fn send(&mut self, email: &Email) -> Result<()> {
        (**self).send(email)
    }
}

/// Represents the email sender provider.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SenderConfig {
    None,
    /// Represents the file sender, writing emails to disk and opening
    /// them in the browser.
    File(FileSenderConfig),
    #[cfg(feature = "smtp-sender")]
    /// Represents the internal SMTP mailer library.
    Smtp(SmtpConfig),
    /// Represents the sendmail command.
    Sendmail(SendmailConfig),
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SenderBuilder;

impl SenderBuilder {
    pub fn build(config: &SenderConfig) -> Result<Box<dyn Sender>> {
        match config {
            SenderConfig::File(config) => Ok(Box::new(FileSender::new(config.clone()))),
            #[cfg(feature = "smtp-sender")]
            SenderConfig::Smtp(config) => Ok(Box::new(Smtp::new(config.clone()))),
            SenderConfig::Sendmail(config) => Ok(Box::new(Sendmail::new(config.clone()))),
            SenderConfig::None => Err(Error::BuildEmailSenderMissingError),
        }
    }
}

/// Represents either the file sender used while developing, or the
/// wrapped real sender.
pub enum Wrapped<S> {
    File(FileSender),
    Inner(S),
}

impl<S> Wrapped<S> {
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl<S: Sender> Sender for Wrapped<S> {
    fn send(&mut self, email: &Email) -> Result<()> {
        match self {
            Self::File(sender) => sender.send(email),
            Self::Inner(sender) => sender.send(email),
        }
    }
}

/// Wraps the given sender: in development mode emails are written to
/// files under the target directory of `env`, in any other mode they
/// go through `sender`.
pub fn wrap<S: Sender>(sender: S, env: &Env) -> Wrapped<S> {
    if env.is_development() {
        info!("{} mode: emails will be written to files", env.mode());
        Wrapped::File(FileSender::new(FileSenderConfig::from_env(env)))
    } else {
        debug!("{} mode: emails will be sent", env.mode());
        Wrapped::Inner(sender)
    }
}
