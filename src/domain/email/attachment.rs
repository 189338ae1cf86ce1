use log::{debug, trace};
use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use crate::email::{Error, Result};

/// Represents where the bytes of an attachment come from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AttachmentContent {
    /// The attachment is held in memory.
    Bytes(Vec<u8>),
    /// The attachment is streamed from the given file when needed.
    Path(PathBuf),
}

/// Represents a file attached to an email.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub content: AttachmentContent,
}

impl Attachment {
    pub fn new<N, T, C>(name: N, content_type: T, content: C) -> Self
    where
        N: ToString,
        T: ToString,
        C: Into<Vec<u8>>,
    {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            content: AttachmentContent::Bytes(content.into()),
        }
    }

    /// Builds an attachment whose bytes are read from `path` only
    /// when the attachment is consumed.
    pub fn streamed<N, T, P>(name: N, content_type: T, path: P) -> Self
    where
        N: ToString,
        T: ToString,
        P: Into<PathBuf>,
    {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            content: AttachmentContent::Path(path.into()),
        }
    }

    /// Builds an attachment from a file on disk. The name is taken
    /// from the file name and the content type is detected from the
    /// file content.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        trace!(">> build attachment from path {:?}", path);

        let name: String = path
            .file_name()
            .ok_or_else(|| Error::GetAttachmentFileNameError(path.to_owned()))?
            .to_string_lossy()
            .into();
        let content =
            fs::read(path).map_err(|err| Error::ReadAttachmentError(err, path.to_owned()))?;
        let content_type = tree_magic::from_u8(&content);
        debug!("detected content type of {:?}: {}", path, content_type);

        trace!("<< build attachment from path {:?}", path);
        Ok(Self::new(name, content_type, content))
    }

    /// Gets a reader over the attachment bytes.
    pub fn reader(&self) -> Result<Box<dyn Read + '_>> {
        match &self.content {
            AttachmentContent::Bytes(bytes) => Ok(Box::new(bytes.as_slice())),
            AttachmentContent::Path(path) => {
                let file =
                    File::open(path).map_err(|err| Error::ReadAttachmentError(err, path.clone()))?;
                Ok(Box::new(file))
            }
        }
    }

    /// Reads the whole attachment in memory.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        match &self.content {
            AttachmentContent::Bytes(bytes) => Ok(bytes.clone()),
            AttachmentContent::Path(path) => {
                fs::read(path).map_err(|err| Error::ReadAttachmentError(err, path.clone()))
            }
        }
    }
}
