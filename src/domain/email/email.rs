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

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use log::{info, trace};
use mailparse::{DispositionType, MailAddr, MailHeaderMap};
use std::{io, path::PathBuf, result};
use thiserror::Error;

use crate::email::{Attachment, Body, PartsIterator};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot get file name of attachment {0:?}")]
    GetAttachmentFileNameError(PathBuf),
    #[error("cannot read attachment at {1:?}")]
    ReadAttachmentError(#[source] io::Error, PathBuf),
    #[error("cannot parse address {1}")]
    ParseAddressError(#[source] lettre::address::AddressError, String),
    #[error("cannot parse content type {1}")]
    ParseContentTypeError(#[source] lettre::message::header::ContentTypeErr, String),
    #[error("cannot build sendable email: email has no body")]
    BuildSendableEmailMissingBodyError,
    #[error("cannot build sendable email")]
    BuildSendableEmailError(#[source] lettre::error::Error),
    #[error("cannot parse email from raw data")]
    ParseRawEmailError(#[source] mailparse::MailParseError),
    #[error("cannot parse {1} addresses: {2}")]
    ParseHeaderAddressesError(#[source] mailparse::MailParseError, String, String),
    #[error("cannot parse {1} part of email")]
    ParsePartBodyError(#[source] mailparse::MailParseError, String),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents an outgoing email.
///
/// Addresses are kept as raw strings, the way they were given by the
/// caller. They are only parsed when the email needs to be sent
/// through a real transport, see [`Email::into_sendable`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub bodies: Vec<Body>,
    pub attachments: Vec<Attachment>,
}

impl Email {
    pub fn from<S: ToString>(mut self, addr: S) -> Self {
        self.from = addr.to_string();
        self
    }

    pub fn to<S: ToString>(mut self, addr: S) -> Self {
        self.to.push(addr.to_string());
        self
    }

    pub fn cc<S: ToString>(mut self, addr: S) -> Self {
        self.cc.push(addr.to_string());
        self
    }

    pub fn bcc<S: ToString>(mut self, addr: S) -> Self {
        self.bcc.push(addr.to_string());
        self
    }

    pub fn subject<S: ToString>(mut self, subject: S) -> Self {
        self.subject = subject.to_string();
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn html_body<S: ToString>(self, content: S) -> Self {
        self.body(Body::html(content))
    }

    pub fn text_plain_body<S: ToString>(self, content: S) -> Self {
        self.body(Body::text_plain(content))
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Builds a [`lettre::Message`] out of the email. Bodies are
    /// grouped in a `multipart/alternative`, which is wrapped in a
    /// `multipart/mixed` together with the attachments if any.
    pub fn into_sendable(&self) -> Result<lettre::Message> {
        trace!(">> build sendable email");

        let mut builder = lettre::Message::builder()
            .subject(self.subject.to_owned())
            .from(parse_mailbox(&self.from)?);

        for addr in &self.to {
            builder = builder.to(parse_mailbox(addr)?);
        }

        for addr in &self.cc {
            builder = builder.cc(parse_mailbox(addr)?);
        }

        for addr in &self.bcc {
            builder = builder.bcc(parse_mailbox(addr)?);
        }

        let mut parts = self.bodies.iter().map(|body| -> Result<SinglePart> {
            Ok(SinglePart::builder()
                .header(parse_content_type(&body.content_type)?)
                .body(body.content.clone()))
        });

        let first_part: SinglePart = parts
            .next()
            .ok_or(Error::BuildSendableEmailMissingBodyError)??;
        let mut alternative = MultiPart::alternative().singlepart(first_part);
        for part in parts {
            alternative = alternative.singlepart(part?);
        }

        let multipart = if self.attachments.is_empty() {
            alternative
        } else {
            let mut mixed = MultiPart::mixed().multipart(alternative);
            for attachment in &self.attachments {
                let content_type = parse_content_type(&attachment.content_type)?;
                let content = attachment.to_vec()?;
                mixed = mixed.singlepart(
                    lettre::message::Attachment::new(attachment.name.clone())
                        .body(content, content_type),
                );
            }
            mixed
        };

        let email = builder
            .multipart(multipart)
            .map_err(Error::BuildSendableEmailError)?;

        trace!("<< build sendable email");
        Ok(email)
    }

    /// Parses a raw RFC 5322 email. Textual leaf parts become bodies,
    /// parts with an attachment disposition become attachments.
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        info!("begin: parsing email from raw data");

        let parsed = mailparse::parse_mail(raw).map_err(Error::ParseRawEmailError)?;
        let headers = parsed.get_headers();

        let mut email = Email {
            from: headers.get_first_value("From").unwrap_or_default(),
            subject: headers.get_first_value("Subject").unwrap_or_default(),
            ..Email::default()
        };

        for (key, addrs) in [
            ("To", &mut email.to),
            ("Cc", &mut email.cc),
            ("Bcc", &mut email.bcc),
        ] {
            if let Some(val) = headers.get_first_value(key) {
                *addrs = parse_addrs(key, &val)?;
            }
        }

        for part in PartsIterator::new(&parsed) {
            if !part.subparts.is_empty() {
                continue;
            }

            let mimetype = &part.ctype.mimetype;
            let disposition = part.get_content_disposition();

            if matches!(disposition.disposition, DispositionType::Attachment) {
                let name = disposition
                    .params
                    .get("filename")
                    .or_else(|| part.ctype.params.get("name"))
                    .cloned()
                    .unwrap_or_else(|| String::from("attachment"));
                let content = part
                    .get_body_raw()
                    .map_err(|err| Error::ParsePartBodyError(err, mimetype.clone()))?;
                email.attachments.push(Attachment::new(name, mimetype, content));
            } else if mimetype.starts_with("text/") {
                let content = part
                    .get_body()
                    .map_err(|err| Error::ParsePartBodyError(err, mimetype.clone()))?;
                email.bodies.push(Body::new(mimetype, content));
            } else {
                trace!("skipping {} part", mimetype);
            }
        }

        info!("end: parsing email from raw data");
        Ok(email)
    }
}

fn parse_mailbox(addr: &str) -> Result<Mailbox> {
    addr.parse()
        .map_err(|err| Error::ParseAddressError(err, addr.to_owned()))
}

fn parse_content_type(content_type: &str) -> Result<ContentType> {
    ContentType::parse(content_type)
        .map_err(|err| Error::ParseContentTypeError(err, content_type.to_owned()))
}

fn parse_addrs(key: &str, val: &str) -> Result<Vec<String>> {
    let addrs = mailparse::addrparse(val)
        .map_err(|err| Error::ParseHeaderAddressesError(err, key.to_owned(), val.to_owned()))?;

    Ok(addrs
        .iter()
        .flat_map(|addr| match addr {
            MailAddr::Single(info) => vec![info.to_string()],
            MailAddr::Group(group) => group.addrs.iter().map(ToString::to_string).collect(),
        })
        .collect())
}
