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

//! Typed HAR document model and loader.
//!
//! Only the fields the replay pipeline consumes are modeled; decoding
//! validates their presence up front so index construction never sees a
//! half-shaped entry.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::error::{HarError, HarResult};

/// A parsed HAR document.
#[derive(Debug, Clone, Deserialize)]
pub struct Har {
    pub log: HarLog,
}

/// The log object: an ordered sequence of recorded exchanges.
#[derive(Debug, Clone, Deserialize)]
pub struct HarLog {
    pub entries: Vec<HarEntry>,
}

/// One recorded request/response pair. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct HarEntry {
    pub request: HarRequest,
    pub response: HarResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarRequest {
    /// Absolute URL the exchange was recorded against
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarResponse {
    pub content: HarContent,
}

/// Recorded response body and its metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarContent {
    /// Content type, possibly with parameters (e.g. "text/html; charset=utf-8")
    pub mime_type: String,

    /// Stored body: literal text, or a base64 transcript of binary data
    #[serde(default)]
    pub text: Option<String>,

    /// How `text` encodes the body
    #[serde(default)]
    pub encoding: ContentEncoding,
}

/// Body encoding recorded by the capturing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    #[default]
    Identity,
    Base64,
}

impl Har {
    /// Load and decode an archive from disk.
    ///
    /// One-shot startup action; there is no retry. Failures name the file
    /// and distinguish an unreadable file from malformed content.
    pub fn load<P: AsRef<Path>>(path: P) -> HarResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| HarError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let har: Har = serde_json::from_str(&raw).map_err(|source| HarError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(har)
    }

    /// Recorded exchanges in archive order.
    pub fn entries(&self) -> &[HarEntry] {
        &self.log.entries
    }
}

impl HarEntry {
    /// Absolute URL this exchange was recorded against.
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// Stored content type, parameters included.
    pub fn mime_type(&self) -> &str {
        &self.response.content.mime_type
    }

    /// Whether the recorded response is an HTML document.
    pub fn is_html(&self) -> bool {
        self.response.content.mime_type.contains("html")
    }

    /// Stored body as text; empty when the capture recorded none.
    pub fn body_text(&self) -> &str {
        self.response.content.text.as_deref().unwrap_or_default()
    }

    /// Stored body as raw bytes, decoding base64 transcripts.
    ///
    /// Identity-encoded bodies come back byte-for-byte as captured.
    pub fn body_bytes(&self) -> HarResult<Vec<u8>> {
        match self.response.content.encoding {
            ContentEncoding::Base64 => general_purpose::STANDARD
                .decode(self.body_text())
                .map_err(|source| HarError::Decode {
                    url: self.request.url.clone(),
                    source,
                }),
            ContentEncoding::Identity => Ok(self.body_text().as_bytes().to_vec()),
        }
    }
}
