//! Sendmail module.
//!
//! This module contains the representation of the sendmail email
//! sender.

use log::info;
use std::result;
use thiserror::Error;

use crate::{process, sender, Email, Sender, SendmailConfig};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot run sendmail command")]
    RunCmdError(#[source] process::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub struct Sendmail {
    config: SendmailConfig,
}

impl Sendmail {
    pub fn new(config: SendmailConfig) -> Self {
        Self { config }
    }
}

impl Sender for Sendmail {
    fn send(&mut self, email: &Email) -> sender::Result<()> {
        info!("sending email {:?} using sendmail", email.subject);
        let input = email.into_sendable()?.formatted();
        process::run(&self.config.cmd, &input).map_err(Error::RunCmdError)?;
        Ok(())
    }
}
