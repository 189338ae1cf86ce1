//! File sender module.
//!
//! This module contains the representation of the file sender, which
//! writes bodies of emails to HTML files instead of sending them.

use log::{debug, info, trace};
use std::{fmt::Write, fs, io, path::PathBuf, process::ExitStatus, result};
use thiserror::Error;

use crate::{email, sender, Email, Sender};

use super::{
    attachment::{save_attachments, AttachmentFile},
    header::{html_field, BodyKind, ATTACHMENTS_PLACEHOLDER},
    opener, FileSenderConfig,
};

/// Minimum amount of bodies an email needs, usually `text/html` and
/// `text/plain`.
pub const MIN_BODIES: usize = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot write email: expected at least 2 bodies, got {0}")]
    MissingBodiesError(usize),
    #[error("cannot create target directory {1:?}")]
    CreateTargetDirError(#[source] io::Error, PathBuf),
    #[error("cannot parse content type {1} of attachment")]
    ParseAttachmentContentTypeError(#[source] mime::FromStrError, String),
    #[error("cannot find file extension of attachment content type {0}")]
    UnknownAttachmentContentTypeError(String),
    #[error("cannot read attachment {1}")]
    ReadAttachmentError(#[source] email::Error, String),
    #[error("cannot create attachment file {1:?}")]
    CreateAttachmentFileError(#[source] io::Error, PathBuf),
    #[error("cannot write attachment file {1:?}")]
    WriteAttachmentFileError(#[source] io::Error, PathBuf),
    #[error("cannot render attachment links")]
    RenderAttachmentsError(#[source] std::fmt::Error),
    #[error("cannot write email body at {1:?}")]
    WriteBodyFileError(#[source] io::Error, PathBuf),
    #[error("cannot open file {1:?}")]
    OpenFileError(#[source] io::Error, PathBuf),
    #[error("cannot open file {1:?}: opener exited with {0}")]
    OpenFileStatusError(ExitStatus, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FileSender {
    config: FileSenderConfig,
}

impl FileSender {
    pub fn new(config: FileSenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileSenderConfig {
        &self.config
    }

    /// Writes the bodies of the given email to HTML files, together
    /// with its attachments, then opens them. Returns the paths of
    /// the body files.
    ///
    /// Files written before an error are left on the disk.
    pub fn write(&self, email: &Email) -> Result<Vec<PathBuf>> {
        info!("begin: writing email {:?} to files", email.subject);

        if email.bodies.len() < MIN_BODIES {
            return Err(Error::MissingBodiesError(email.bodies.len()));
        }

        let dir = &self.config.target_dir;
        fs::create_dir_all(dir).map_err(|err| Error::CreateTargetDirError(err, dir.clone()))?;

        let mut attachment_files: Option<Vec<AttachmentFile>> = None;
        let mut paths = Vec::new();

        for (index, body) in email.bodies.iter().enumerate() {
            if !self.config.should_write(&body.content_type) {
                debug!("skipping {} body", body.content_type);
                continue;
            }

            let kind = BodyKind::from_content_type(&body.content_type);
            let content = kind.render(email, &body.content);

            // attachments are written once per email, only if at
            // least one body is written
            if attachment_files.is_none() {
                attachment_files = Some(save_attachments(&self.config, &email.attachments)?);
            }
            let content =
                render_attachments(&content, attachment_files.as_deref().unwrap_or_default())?;

            let path = self.config.body_file_path(email, body, index);
            fs::write(&path, content).map_err(|err| Error::WriteBodyFileError(err, path.clone()))?;
            debug!("{} body written at {:?}", body.content_type, path);

            if self.config.should_open() {
                opener::open(self.config.opener.as_deref(), &path)?;
            }

            paths.push(path);
        }

        info!("end: writing email {:?} to files", email.subject);
        Ok(paths)
    }
}

impl Sender for FileSender {
    fn send(&mut self, email: &Email) -> sender::Result<()> {
        self.write(email)?;
        Ok(())
    }
}

/// Replaces the attachments placeholder of the given content by one
/// link per attachment file.
pub fn render_attachments(content: &str, files: &[AttachmentFile]) -> Result<String> {
    trace!(">> render attachments");

    let mut links = String::new();
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            links.push('\n');
        }

        let path = file.path.to_string_lossy();
        let name = html_escape::encode_text(&file.name);
        let link = format!(
            "<a href=\"{}\" download=\"{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&path),
            html_escape::encode_double_quoted_attribute(&file.name),
            name,
        );
        write!(links, "{}", html_field(&format!("Attachment-{}", name), &link))
            .map_err(Error::RenderAttachmentsError)?;
    }

    trace!("<< render attachments");
    Ok(content.replacen(ATTACHMENTS_PLACEHOLDER, &links, 1))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::{Attachment, Body, FileNaming};

    use super::*;

    fn email() -> Email {
        Email::default()
            .from("testing@testing.com")
            .to("testing@other.com")
            .cc("aa@other.com")
            .bcc("aax@other.com")
            .subject("something")
            .html_body("<html><head></head><body><div>Some Message</div></body></html>")
            .text_plain_body("Same message")
    }

    fn config(dir: &Path) -> FileSenderConfig {
        FileSenderConfig::default().target_dir(dir).testing(true)
    }

    #[test]
    fn render_attachments_without_files() {
        assert_eq!(
            "<div>\n\n</div>",
            render_attachments(&format!("<div>\n{}\n</div>", ATTACHMENTS_PLACEHOLDER), &[])
                .unwrap()
        );
    }

    #[test]
    fn render_attachments_with_files() {
        let files = [AttachmentFile {
            path: PathBuf::from("/tmp/a\"b.csv"),
            name: "<data>".into(),
        }];
        let content = render_attachments(ATTACHMENTS_PLACEHOLDER, &files).unwrap();

        assert!(content.contains("Attachment-&lt;data&gt;:"));
        assert!(content.contains("href=\"/tmp/a&quot;b.csv\""));
        assert!(content.contains("download=\"&lt;data&gt;\""));
        assert!(!content.contains(ATTACHMENTS_PLACEHOLDER));
    }

    #[test]
    fn write_needs_two_bodies() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(&dir.path().join("out")));
        let email = Email::default().html_body("<body></body>");

        assert!(matches!(
            sender.write(&email),
            Err(Error::MissingBodiesError(1))
        ));
        // nothing happened on the disk, not even the target dir
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn write_bodies_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(dir.path()));

        let paths = sender.write(&email()).unwrap();

        assert_eq!(
            vec![
                dir.path().join("text_html_body.html"),
                dir.path().join("text_plain_body.html"),
            ],
            paths
        );
    }

    #[test]
    fn write_creates_target_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target_dir = dir.path().join("nested").join("mails");
        let sender = FileSender::new(config(&target_dir));

        sender.write(&email()).unwrap();

        assert!(target_dir.join("text_html_body.html").is_file());
    }

    #[test]
    fn write_attachments_once() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(FileSenderConfig::default().target_dir(dir.path()).open(false));
        let email = email().attachment(Attachment::new("data", "text/csv", "a,b\n"));

        sender.write(&email).unwrap();

        let csv_files = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with("_data.csv"))
            .count();
        assert_eq!(1, csv_files);
    }

    #[test]
    fn write_skips_attachments_when_no_body_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(dir.path()).only(["application/json"]));
        let email = email().attachment(Attachment::new("data", "text/csv", "a,b\n"));

        assert!(sender.write(&email).unwrap().is_empty());
        assert!(!dir.path().join("data.csv").exists());
    }

    #[test]
    fn write_other_bodies_as_they_are() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(dir.path()));
        let email = email().body(Body::new("application/json", "{\"a\":1}"));

        let paths = sender.write(&email).unwrap();

        assert_eq!(3, paths.len());
        assert_eq!("{\"a\":1}", fs::read_to_string(&paths[2]).unwrap());
    }

    #[test]
    fn write_bodies_with_same_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(dir.path()));
        let email = email().html_body("<html><head></head><body><div>Other</div></body></html>");

        let paths = sender.write(&email).unwrap();

        assert_eq!(
            vec![
                dir.path().join("text_html_body_0.html"),
                dir.path().join("text_plain_body.html"),
                dir.path().join("text_html_body_2.html"),
            ],
            paths
        );
        assert!(fs::read_to_string(&paths[0]).unwrap().contains("Some Message"));
        assert!(fs::read_to_string(&paths[2]).unwrap().contains("Other"));
    }

    #[test]
    fn write_with_subject_naming() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(dir.path()).naming(FileNaming::Subject));

        let paths = sender.write(&email()).unwrap();

        assert_eq!(
            vec![
                dir.path().join("something_0.html"),
                dir.path().join("something_1.html"),
            ],
            paths
        );
    }

    #[cfg(unix)]
    #[test]
    fn write_fails_when_opener_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(
            FileSenderConfig::default()
                .target_dir(dir.path())
                .opener("false"),
        );

        assert!(matches!(
            sender.write(&email()),
            Err(Error::OpenFileStatusError(_, _))
        ));

        // the first body is written before being opened, the second
        // one is never reached
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(1, names.len());
        assert!(names[0].starts_with("text_html_body_"));
    }

    #[test]
    fn write_fails_when_opener_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(
            FileSenderConfig::default()
                .target_dir(dir.path())
                .opener("mailopen-missing-opener"),
        );

        assert!(matches!(
            sender.write(&email()),
            Err(Error::OpenFileError(_, path)) if path.is_file()
        ));
    }

    #[test]
    fn write_aborts_on_unknown_attachment_type() {
        let dir = tempfile::tempdir().unwrap();
        let sender = FileSender::new(config(dir.path()));
        let email = email().attachment(Attachment::new("blob", "application/x-unknown", "?"));

        assert!(matches!(
            sender.write(&email),
            Err(Error::UnknownAttachmentContentTypeError(_))
        ));
        assert!(!dir.path().join("text_html_body.html").exists());
    }
}
