// mailopen-lib, a Rust library to preview outgoing emails in the browser.
// Copyright (C) 2022  soywod <clement.douin@posteo.net>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! SMTP config module.
//!
//! This module contains the representation of the SMTP email sender
//! configuration.

use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::process;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot get smtp password")]
    GetPasswdError(#[source] process::Error),
    #[error("cannot get smtp password: password is empty")]
    GetPasswdEmptyError,
}

/// Represents the SMTP sender config.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Represents the SMTP server host.
    pub host: String,
    /// Represents the SMTP server port.
    pub port: u16,
    /// Enables SSL.
    pub ssl: Option<bool>,
    /// Enables StartTLS.
    pub starttls: Option<bool>,
    /// Trusts any certificate.
    pub insecure: Option<bool>,
    /// Represents the SMTP server login.
    pub login: String,
    /// Represents the SMTP password command.
    pub passwd_cmd: String,
}

impl SmtpConfig {
    /// Builds the SMTP sender credentials.
    pub fn credentials(&self) -> Result<SmtpCredentials, Error> {
        let passwd = process::run_to_string(&self.passwd_cmd).map_err(Error::GetPasswdError)?;
        let passwd = passwd
            .lines()
            .next()
            .filter(|passwd| !passwd.is_empty())
            .ok_or(Error::GetPasswdEmptyError)?;
        Ok(SmtpCredentials::new(
            self.login.to_owned(),
            passwd.to_owned(),
        ))
    }

    pub fn ssl(&self) -> bool {
        self.ssl.unwrap_or(true)
    }

    pub fn starttls(&self) -> bool {
        self.starttls.unwrap_or_default()
    }

    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or_default()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn credentials() {
        let config = SmtpConfig {
            login: "alice@localhost".into(),
            passwd_cmd: "echo 'password'".into(),
            ..SmtpConfig::default()
        };

        assert_eq!(
            SmtpCredentials::new("alice@localhost".into(), "password".into()),
            config.credentials().unwrap()
        );
    }

    #[test]
    fn credentials_empty_passwd() {
        let config = SmtpConfig {
            passwd_cmd: "echo".into(),
            ..SmtpConfig::default()
        };

        assert!(matches!(
            config.credentials(),
            Err(Error::GetPasswdEmptyError)
        ));
    }

    #[test]
    fn defaults() {
        let config = SmtpConfig::default();
        assert!(config.ssl());
        assert!(!config.starttls());
        assert!(!config.insecure());
    }
}
