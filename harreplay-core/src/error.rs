// Copyright 2026 Harreplay Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Archive loading and replay preparation error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for archive operations
pub type HarResult<T> = Result<T, HarError>;

/// Errors raised while loading an archive or preparing it for replay.
///
/// Everything except `Decode` is fatal at startup: the process exits
/// before binding a listener.
#[derive(Debug, Error)]
pub enum HarError {
    /// Archive file could not be read
    #[error("failed to read HAR file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Archive content is not valid JSON of the expected HAR shape
    #[error("failed to parse HAR file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No entry with an HTML content type exists
    #[error("no main HTML content found in HAR file")]
    NoMainEntry,

    /// A stored base64 payload could not be decoded
    #[error("invalid base64 payload recorded for {url}: {source}")]
    Decode {
        url: String,
        source: base64::DecodeError,
    },
}
