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

//! Harreplay Core
//!
//! HAR document model, asset index, and reference rewriting for the
//! harreplay replay server. Everything here is built once from a loaded
//! archive and read-only afterwards.

pub mod archive;
pub mod context;
pub mod error;
pub mod index;
pub mod rewrite;

pub use archive::{ContentEncoding, Har, HarContent, HarEntry, HarLog, HarRequest, HarResponse};
pub use context::ReplayContext;
pub use error::{HarError, HarResult};
pub use index::AssetIndex;
pub use rewrite::rewrite_references;
