//! Attachment module.
//!
//! This module contains the logic writing email attachments next to
//! the body files.

use log::{debug, trace};
use std::{fs::File, io, path::PathBuf};

use crate::Attachment;

use super::{Error, FileSenderConfig, Result};

/// Maximum length of an attachment name once used in a file name.
pub const MAX_NAME_LEN: usize = 50;

// content type essence => file extension
const EXTENSIONS: &[(&str, &str)] = &[
    ("application/gzip", ".gz"),
    ("application/javascript", ".js"),
    ("application/json", ".json"),
    ("application/msword", ".doc"),
    ("application/octet-stream", ".bin"),
    ("application/pdf", ".pdf"),
    ("application/pgp-encrypted", ".pgp"),
    ("application/pgp-signature", ".sig"),
    ("application/rtf", ".rtf"),
    ("application/vnd.ms-excel", ".xls"),
    ("application/vnd.ms-powerpoint", ".ppt"),
    ("application/vnd.oasis.opendocument.presentation", ".odp"),
    ("application/vnd.oasis.opendocument.spreadsheet", ".ods"),
    ("application/vnd.oasis.opendocument.text", ".odt"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".pptx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xlsx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("application/wasm", ".wasm"),
    ("application/x-7z-compressed", ".7z"),
    ("application/x-tar", ".tar"),
    ("application/xml", ".xml"),
    ("application/zip", ".zip"),
    ("audio/mpeg", ".mp3"),
    ("audio/ogg", ".oga"),
    ("audio/wav", ".wav"),
    ("font/otf", ".otf"),
    ("font/ttf", ".ttf"),
    ("font/woff", ".woff"),
    ("font/woff2", ".woff2"),
    ("image/avif", ".avif"),
    ("image/bmp", ".bmp"),
    ("image/gif", ".gif"),
    ("image/jpeg", ".jpeg"),
    ("image/png", ".png"),
    ("image/svg+xml", ".svg"),
    ("image/tiff", ".tiff"),
    ("image/webp", ".webp"),
    ("image/x-icon", ".ico"),
    ("message/rfc822", ".eml"),
    ("text/calendar", ".ics"),
    ("text/css", ".css"),
    ("text/csv", ".csv"),
    ("text/html", ".html"),
    ("text/javascript", ".js"),
    ("text/markdown", ".md"),
    ("text/plain", ".txt"),
    ("text/xml", ".xml"),
    ("video/mp4", ".mp4"),
    ("video/mpeg", ".mpeg"),
    ("video/ogg", ".ogv"),
    ("video/webm", ".webm"),
];

/// Represents an attachment written on the disk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttachmentFile {
    pub path: PathBuf,
    pub name: String,
}

/// Gets the file extension, dot included, registered for the given
/// content type.
pub fn extension_by_type(content_type: &str) -> Result<&'static str> {
    let mime: mime::Mime = content_type
        .parse()
        .map_err(|err| Error::ParseAttachmentContentTypeError(err, content_type.to_owned()))?;
    let essence = mime.essence_str().to_lowercase();

    EXTENSIONS
        .iter()
        .find(|(ctype, _)| *ctype == essence)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| Error::UnknownAttachmentContentTypeError(content_type.to_owned()))
}

/// Replaces characters that are not safe in file names by `_`, then
/// truncates the result to `max_len` characters.
pub fn sanitize(name: &str, max_len: usize) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() {
        String::from("attachment")
    } else {
        sanitized
    }
}

/// Writes the given attachments in the target directory.
pub fn save_attachments(
    config: &FileSenderConfig,
    attachments: &[Attachment],
) -> Result<Vec<AttachmentFile>> {
    trace!(">> save attachments");

    let mut files = Vec::with_capacity(attachments.len());

    for attachment in attachments {
        let ext = extension_by_type(&attachment.content_type)?;
        let path = config.attachment_file_path(&attachment.name, ext);

        let mut reader = attachment
            .reader()
            .map_err(|err| Error::ReadAttachmentError(err, attachment.name.clone()))?;
        let mut file = File::create(&path)
            .map_err(|err| Error::CreateAttachmentFileError(err, path.clone()))?;
        io::copy(&mut reader, &mut file)
            .map_err(|err| Error::WriteAttachmentFileError(err, path.clone()))?;
        debug!("attachment {:?} written at {:?}", attachment.name, path);

        files.push(AttachmentFile {
            path,
            name: attachment.name.clone(),
        });
    }

    trace!("<< save attachments");
    Ok(files)
}
