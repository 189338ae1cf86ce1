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

//! Header module.
//!
//! This module contains the logic building the block of email
//! metadata and injecting it into the email bodies.

use log::{trace, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{email::essence, Email};

/// Marker replaced by the attachment links once attachments are
/// written on the disk.
pub const ATTACHMENTS_PLACEHOLDER: &str = "<!-- mailopen:attachments -->";

/// Separates the plain text header from the body.
pub const PLAIN_SEPARATOR: &str = "----------------------------";

static HTML_BODY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(<body[^>]*>)(.*)(</body>)").unwrap());
static PLAIN_PRE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(<pre[^>]*>)(.*)(</pre>)").unwrap());

/// Represents the kind of a body, which drives the way it is
/// rendered.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BodyKind {
    /// `text/html` bodies get an HTML header right after the `<body>`
    /// tag.
    Html,
    /// `text/plain` bodies are wrapped in a `<pre>` tag and get a
    /// textual header at its top.
    Plain,
    /// Other bodies are written as they are.
    Other,
}

impl BodyKind {
    pub fn from_content_type(content_type: &str) -> Self {
        match essence(content_type).as_str() {
            "text/html" => Self::Html,
            "text/plain" => Self::Plain,
            _ => Self::Other,
        }
    }

    /// Prepares the raw content so it can receive the header.
    pub fn preformat(&self, content: &str) -> String {
        match self {
            Self::Plain => format!(
                "<html><head></head><body><pre>{}</pre></body></html>",
                html_escape::encode_text(content)
            ),
            Self::Html | Self::Other => content.to_owned(),
        }
    }

    /// Builds the header block of the given email.
    pub fn header(&self, email: &Email) -> Option<String> {
        let from = html_escape::encode_text(&email.from);
        let to = html_escape::encode_text(&email.to.join(", ")).into_owned();
        let cc = html_escape::encode_text(&email.cc.join(", ")).into_owned();
        let bcc = html_escape::encode_text(&email.bcc.join(", ")).into_owned();
        let subject = html_escape::encode_text(&email.subject);

        match self {
            Self::Html => {
                let mut header = String::from(
                    "<div class=\"email-information\" style=\"background-color: white; padding: 10px; border-bottom: 1px solid #333;\">\n",
                );
                for (key, val) in [
                    ("From", &*from),
                    ("To", to.as_str()),
                    ("Cc", cc.as_str()),
                    ("Bcc", bcc.as_str()),
                    ("Subject", &*subject),
                ] {
                    header.push_str(&html_field(key, val));
                    header.push('\n');
                }
                header.push_str(ATTACHMENTS_PLACEHOLDER);
                header.push_str("\n</div>");
                Some(header)
            }
            Self::Plain => Some(format!(
                "From: {}\nTo: {}\nCc: {}\nBcc: {}\nSubject: {}\n{}",
                from, to, cc, bcc, subject, PLAIN_SEPARATOR
            )),
            Self::Other => None,
        }
    }

    fn regex(&self) -> Option<&'static Regex> {
        match self {
            Self::Html => Some(&*HTML_BODY_REGEX),
            Self::Plain => Some(&*PLAIN_PRE_REGEX),
            Self::Other => None,
        }
    }

    /// Inserts the header right after the opening tag wrapping the
    /// content. The content is returned unchanged if the wrapping
    /// tags cannot be found.
    pub fn inject(&self, content: &str, header: &str) -> String {
        let regex = match self.regex() {
            Some(regex) => regex,
            None => return content.to_owned(),
        };

        if !regex.is_match(content) {
            warn!("cannot find where to inject header in {:?} body", self);
            return content.to_owned();
        }

        regex
            .replace(content, |caps: &Captures| {
                format!("{}\n{}\n{}{}", &caps[1], header, &caps[2], &caps[3])
            })
            .into_owned()
    }

    /// Renders the given body content of the given email: preformats
    /// it, then injects the header into it.
    pub fn render(&self, email: &Email, content: &str) -> String {
        trace!(">> render {:?} body", self);

        let content = self.preformat(content);
        let content = match self.header(email) {
            Some(header) => self.inject(&content, &header),
            None => {
                warn!("no header for {:?} body, writing it as it is", self);
                content
            }
        };

        trace!("<< render {:?} body", self);
        content
    }
}

/// Builds one line of the HTML header. The value must be escaped.
pub fn html_field(key: &str, val: &str) -> String {
    format!(
        "<p style=\"margin-bottom: 0;\"><span style=\"font-weight: bold;\">{}:</span> {}</p>",
        key, val
    )
}
