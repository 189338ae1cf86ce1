//! Process module.
//!
//! This module contains cross platform helpers around the
//! `std::process` crate.

use log::debug;
use std::{
    env,
    io::{self, prelude::*},
    process::{Command, ExitStatus, Stdio},
    result, string, thread,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot spawn process for command {1:?}")]
    SpawnProcessError(#[source] io::Error, String),
    #[error("cannot get standard input")]
    GetStdinError,
    #[error("cannot write data to standard input")]
    WriteStdinError(#[source] io::Error),
    #[error("cannot write data to standard input: writer panicked")]
    WriteStdinPanicError,
    #[error("cannot wait for command {1:?} to exit")]
    WaitProcessError(#[source] io::Error, String),
    #[error("command {0:?} exited with {1}: {2}")]
    ExitStatusError(String, ExitStatus, String),
    #[error("cannot parse command output")]
    ParseCmdOutputError(#[source] string::FromUtf8Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Runs the given command, feeding it with the given input, and
/// returns the raw output. Commands separated by `|` are chained.
pub fn run(cmd: &str, input: &[u8]) -> Result<Vec<u8>> {
    let mut output = input.to_owned();

    for cmd in cmd.split('|') {
        debug!("running command: {}", cmd);
        output = pipe(cmd.trim(), &output)?;
    }

    Ok(output)
}

/// Runs the given command without input and returns the output as
/// UTF-8 string.
pub fn run_to_string(cmd: &str) -> Result<String> {
    let output = run(cmd, &[])?;
    String::from_utf8(output).map_err(Error::ParseCmdOutputError)
}

/// Runs the given command in a pipeline and returns the raw output.
///
/// The input is written from a separate thread while stdout and
/// stderr are drained, so commands producing more than a pipe buffer
/// of output cannot block.
pub fn pipe(cmd: &str, input: &[u8]) -> Result<Vec<u8>> {
    let windows = cfg!(target_os = "windows")
        && env::var("MSYSTEM")
            .map(|env| !env.starts_with("MINGW"))
            .unwrap_or_default();

    let mut pipeline = if windows {
        Command::new("cmd")
            .args(["/C", cmd])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    } else {
        Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    }
    .map_err(|err| Error::SpawnProcessError(err, cmd.to_string()))?;

    let mut stdin = pipeline.stdin.take().ok_or(Error::GetStdinError)?;

    // stdin is moved into the writer and dropped once written, so the
    // command receives EOF
    let (written, output) = thread::scope(|scope| {
        let writer = scope.spawn(move || match stdin.write_all(input) {
            // the command exited without reading its whole input
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            res => res,
        });
        let output = pipeline.wait_with_output();
        (writer.join(), output)
    });

    let output = output.map_err(|err| Error::WaitProcessError(err, cmd.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        return Err(Error::ExitStatusError(cmd.to_string(), output.status, stderr));
    }

    written
        .map_err(|_| Error::WriteStdinPanicError)?
        .map_err(Error::WriteStdinError)?;

    Ok(output.stdout)
}
