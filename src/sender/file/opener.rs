//! Opener module.
//!
//! This module contains the cross platform logic opening files with
//! the default application of the user.

use log::debug;
use std::{
    path::Path,
    process::{Command, Stdio},
};

use super::{Error, Result};

/// Builds the command opening the given file, with the given opener
/// program or with the default application when missing.
pub fn command(opener: Option<&str>, path: &Path) -> Command {
    let mut cmd = if let Some(opener) = opener {
        Command::new(opener)
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        // the empty argument is the title of the window, start would
        // take a quoted path for it otherwise
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };

    cmd.arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Opens the given file with the given opener program, or with the
/// default application when missing.
pub fn open(opener: Option<&str>, path: &Path) -> Result<()> {
    debug!("opening {:?} with {}", path, opener.unwrap_or("the default application"));

    let status = command(opener, path)
        .status()
        .map_err(|err| Error::OpenFileError(err, path.to_owned()))?;

    if !status.success() {
        return Err(Error::OpenFileStatusError(status, path.to_owned()));
    }

    Ok(())
}
