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

//! Environment module.
//!
//! This module contains the representation of the environment
//! variables driving the choice of the sender.

use log::{debug, warn};
use std::{env, path::PathBuf};

/// Environment variable holding the mode of the application.
pub const MODE_VAR: &str = "MAILOPEN_ENV";
/// Environment variable holding the directory emails are written
/// to.
pub const DIR_VAR: &str = "MAILOPEN_DIR";
/// Mode in which emails are written to files instead of being sent.
pub const DEVELOPMENT_MODE: &str = "development";

/// Represents the environment of the application.
///
/// It is usually read from the process with [`Env::from_process`],
/// but can be built by hand.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Env {
    /// Represents the application mode, `development` when missing.
    pub mode: Option<String>,
    /// Represents the target directory, the OS temporary directory
    /// when missing.
    pub dir: Option<String>,
}

impl Env {
    pub fn from_process() -> Self {
        Self {
            mode: env::var(MODE_VAR).ok(),
            dir: env::var(DIR_VAR).ok(),
        }
    }

    pub fn mode(&self) -> &str {
        self.mode
            .as_deref()
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .unwrap_or(DEVELOPMENT_MODE)
    }

    pub fn is_development(&self) -> bool {
        self.mode() == DEVELOPMENT_MODE
    }

    /// Gets the target directory path. Shell variables and `~` are
    /// expanded. Falls back to the OS temporary directory when the
    /// directory is missing or cannot be expanded.
    pub fn target_dir(&self) -> PathBuf {
        let dir = self
            .dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .and_then(|dir| match shellexpand::full(dir) {
                Ok(dir) => Some(PathBuf::from(dir.to_string())),
                Err(err) => {
                    warn!("cannot expand target directory {:?}: {}", dir, err);
                    warn!("falling back to the temporary directory");
                    None
                }
            })
            .unwrap_or_else(env::temp_dir);
        debug!("target directory: {:?}", dir);
        dir
    }
}
