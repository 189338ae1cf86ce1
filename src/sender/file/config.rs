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

//! File sender config module.
//!
//! This module contains the representation of the file sender
//! configuration.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use uuid::Uuid;

use crate::{email::essence, Body, Email, Env};

use super::attachment::{sanitize, MAX_NAME_LEN};

/// Represents the way body files are named.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileNaming {
    /// Names files after the body content type, for example
    /// `text_html_body.html`.
    ContentType,
    /// Names files after the email subject and the body index, for
    /// example `welcome_aboard_0.html`.
    Subject,
}

impl Default for FileNaming {
    fn default() -> Self {
        Self::ContentType
    }
}

/// Represents the file sender config.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSenderConfig {
    /// Opens written files with the default application.
    pub open: bool,
    /// Represents the directory files are written to.
    pub target_dir: PathBuf,
    /// Represents the content types of the bodies to write. All
    /// bodies are written when empty.
    pub content_types: Vec<String>,
    /// Enables the testing mode: file names are deterministic and
    /// files are never opened.
    pub testing: bool,
    /// Represents the way body files are named.
    pub naming: FileNaming,
    /// Represents the program opening written files. The default
    /// application of the platform is used when missing.
    pub opener: Option<String>,
}

impl Default for FileSenderConfig {
    fn default() -> Self {
        Self {
            open: true,
            target_dir: env::temp_dir(),
            content_types: Vec::new(),
            testing: false,
            naming: FileNaming::default(),
            opener: None,
        }
    }
}

impl FileSenderConfig {
    pub fn from_env(env: &Env) -> Self {
        Self {
            target_dir: env.target_dir(),
            ..Self::default()
        }
    }

    /// Restricts the bodies to write to the given content types.
    pub fn only<I, S>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.content_types = content_types
            .into_iter()
            .map(|ctype| ctype.to_string())
            .collect();
        self
    }

    pub fn target_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.target_dir = dir.into();
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    pub fn naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn opener<S: ToString>(mut self, opener: S) -> Self {
        self.opener = Some(opener.to_string());
        self
    }

    /// Checks if a body of the given content type should be written.
    pub fn should_write(&self, content_type: &str) -> bool {
        if self.content_types.is_empty() {
            return true;
        }

        let content_type = essence(content_type);
        self.content_types
            .iter()
            .any(|ctype| essence(ctype) == content_type)
    }

    pub fn should_open(&self) -> bool {
        self.open && !self.testing
    }

    /// Builds the path of the file the body at `index` is written to.
    ///
    /// With [`FileNaming::ContentType`], bodies sharing the same
    /// content type get their index in the name, so they do not
    /// overwrite each other in testing mode.
    pub fn body_file_path(&self, email: &Email, body: &Body, index: usize) -> PathBuf {
        let stem = match self.naming {
            FileNaming::ContentType => {
                let essence = body.essence();
                let stem = format!("{}_body", essence.replace('/', "_"));
                let same_type = email
                    .bodies
                    .iter()
                    .filter(|body| body.essence() == essence)
                    .count();
                if same_type > 1 {
                    format!("{}_{}", stem, index)
                } else {
                    stem
                }
            }
            FileNaming::Subject => {
                let subject = email.subject.to_case(Case::Snake);
                let subject = if subject.is_empty() {
                    String::from("email")
                } else {
                    subject
                };
                format!("{}_{}", subject, index)
            }
        };
        let stem = sanitize(&stem, usize::MAX);

        let file_name = if self.testing {
            format!("{}.html", stem)
        } else {
            format!("{}_{}.html", stem, Uuid::new_v4())
        };

        self.target_dir.join(file_name)
    }

    /// Builds the path of the file an attachment is written to. The
    /// name is sanitized and truncated.
    pub fn attachment_file_path(&self, name: &str, ext: &str) -> PathBuf {
        let name = sanitize(name, MAX_NAME_LEN);

        let file_name = if self.testing {
            format!("{}{}", name, ext)
        } else {
            format!("{}_{}{}", Uuid::new_v4(), name, ext)
        };

        self.target_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn email() -> Email {
        Email::default()
            .subject("Welcome aboard")
            .html_body("<html><body></body></html>")
            .text_plain_body("Welcome")
    }

    #[test]
    fn should_write() {
        let config = FileSenderConfig::default();
        assert!(config.should_write("text/html"));
        assert!(config.should_write("application/json"));

        let config = config.only(["text/html"]);
        assert!(config.should_write("text/html"));
        assert!(config.should_write("Text/HTML; charset=utf-8"));
        assert!(!config.should_write("text/plain"));
    }

    #[test]
    fn should_open() {
        let config = FileSenderConfig::default();
        assert!(config.should_open());
        assert!(!config.clone().open(false).should_open());
        assert!(!config.testing(true).should_open());
    }

    #[test]
    fn body_file_path_by_content_type() {
        let email = email();
        let config = FileSenderConfig::default()
            .target_dir("/tmp/mailopen")
            .testing(true);

        assert_eq!(
            Path::new("/tmp/mailopen/text_html_body.html"),
            config.body_file_path(&email, &email.bodies[0], 0)
        );
        assert_eq!(
            Path::new("/tmp/mailopen/text_plain_body.html"),
            config.body_file_path(&email, &email.bodies[1], 1)
        );
    }

    #[test]
    fn body_file_path_with_same_content_types() {
        let email = email().html_body("<html><body>Another</body></html>");
        let config = FileSenderConfig::default()
            .target_dir("/tmp/mailopen")
            .testing(true);

        assert_eq!(
            Path::new("/tmp/mailopen/text_html_body_0.html"),
            config.body_file_path(&email, &email.bodies[0], 0)
        );
        assert_eq!(
            Path::new("/tmp/mailopen/text_plain_body.html"),
            config.body_file_path(&email, &email.bodies[1], 1)
        );
        assert_eq!(
            Path::new("/tmp/mailopen/text_html_body_2.html"),
            config.body_file_path(&email, &email.bodies[2], 2)
        );
    }

    #[test]
    fn body_file_path_by_subject() {
        let email = email();
        let config = FileSenderConfig::default()
            .target_dir("/tmp/mailopen")
            .naming(FileNaming::Subject)
            .testing(true);

        assert_eq!(
            Path::new("/tmp/mailopen/welcome_aboard_1.html"),
            config.body_file_path(&email, &email.bodies[1], 1)
        );

        let email = Email::default().text_plain_body("no subject");
        assert_eq!(
            Path::new("/tmp/mailopen/email_0.html"),
            config.body_file_path(&email, &email.bodies[0], 0)
        );
    }

    #[test]
    fn body_file_path_is_unique_outside_testing() {
        let email = email();
        let config = FileSenderConfig::default().target_dir("/tmp/mailopen");

        let a = config.body_file_path(&email, &email.bodies[0], 0);
        let b = config.body_file_path(&email, &email.bodies[0], 0);

        assert_ne!(a, b);
        assert!(a
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap()
            .starts_with("text_html_body_"));
    }

    #[test]
    fn attachment_file_path() {
        let config = FileSenderConfig::default()
            .target_dir("/tmp/mailopen")
            .testing(true);

        assert_eq!(
            Path::new("/tmp/mailopen/my_report.pdf"),
            config.attachment_file_path("my report", ".pdf")
        );

        let path = config.attachment_file_path(&"x".repeat(80), ".csv");
        assert_eq!(
            format!("{}.csv", "x".repeat(50)),
            path.file_name().unwrap().to_str().unwrap()
        );
    }
}
