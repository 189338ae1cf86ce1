//! SMTP module.
//!
//! This module contains the representation of the SMTP email sender.

use lettre::{
    transport::smtp::{
        client::{Tls, TlsParameters},
        SmtpTransport,
    },
    Transport,
};
use log::info;
use std::result;
use thiserror::Error;

use crate::{sender, Email, Sender, SmtpConfig};

use super::config;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build smtp transport relay")]
    BuildTransportRelayError(#[source] lettre::transport::smtp::Error),
    #[error("cannot build smtp tls parameters")]
    BuildTlsParamsError(#[source] lettre::transport::smtp::Error),
    #[error("cannot send email")]
    SendError(#[source] lettre::transport::smtp::Error),

    #[error(transparent)]
    SmtpConfigError(#[from] config::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub struct Smtp {
    config: SmtpConfig,
    transport: Option<SmtpTransport>,
}

impl Smtp {
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        let builder = if self.config.ssl() {
            let tls = TlsParameters::builder(self.config.host.to_owned())
                .dangerous_accept_invalid_hostnames(self.config.insecure())
                .dangerous_accept_invalid_certs(self.config.insecure())
                .build()
                .map_err(Error::BuildTlsParamsError)?;

            if self.config.starttls() {
                SmtpTransport::starttls_relay(&self.config.host)
                    .map_err(Error::BuildTransportRelayError)?
                    .tls(Tls::Required(tls))
            } else {
                SmtpTransport::relay(&self.config.host)
                    .map_err(Error::BuildTransportRelayError)?
                    .tls(Tls::Wrapper(tls))
            }
        } else {
            SmtpTransport::relay(&self.config.host)
                .map_err(Error::BuildTransportRelayError)?
                .tls(Tls::None)
        };

        Ok(builder
            .port(self.config.port)
            .credentials(self.config.credentials()?)
            .build())
    }

    fn transport(&mut self) -> Result<&SmtpTransport> {
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => self.build_transport()?,
        };

        Ok(self.transport.insert(transport))
    }
}

impl Sender for Smtp {
    fn send(&mut self, email: &Email) -> sender::Result<()> {
        info!("sending email {:?} using smtp", email.subject);
        let email = email.into_sendable()?;
        self.transport()?
            .send(&email)
            .map_err(Error::SendError)?;
        Ok(())
    }
}
