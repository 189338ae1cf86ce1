//! File sender module.
//!
//! This module contains the sender writing emails to HTML files and
//! opening them in the browser.

pub mod attachment;
pub use attachment::AttachmentFile;

pub mod config;
pub use config::{FileNaming, FileSenderConfig};

pub mod file;
pub use file::{Error, FileSender, Result};

pub mod header;
pub use header::BodyKind;

pub mod opener;
