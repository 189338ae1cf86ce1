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

//! Sendmail config module.
//!
//! This module contains the representation of the sendmail email
//! sender configuration.

use serde::{Deserialize, Serialize};

/// Represents the sendmail sender config.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SendmailConfig {
    /// Represents the sendmail command. The formatted email is given
    /// to its standard input.
    pub cmd: String,
}

impl Default for SendmailConfig {
    fn default() -> Self {
        Self {
            cmd: String::from("/usr/sbin/sendmail -t"),
        }
    }
}
