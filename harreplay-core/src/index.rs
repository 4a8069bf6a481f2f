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

//! Asset lookup over recorded entries.

use crate::archive::HarEntry;

/// Lookup table over every entry except the main document, in archive order.
///
/// Built once at startup and never mutated; request handlers share it
/// read-only without locks. The ordered scan is load-bearing: suffix-match
/// ties resolve to the first entry in archive order, so a keyed map would
/// change behavior.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    assets: Vec<HarEntry>,
}

impl AssetIndex {
    pub(crate) fn new(assets: Vec<HarEntry>) -> Self {
        Self { assets }
    }

    /// Number of indexed assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Find the entry recorded for `candidate`.
    ///
    /// Matches an entry whose absolute URL equals the candidate, or ends
    /// with it. The empty string never matches: every URL ends with it, so
    /// it would otherwise alias the first asset.
    pub fn resolve(&self, candidate: &str) -> Option<&HarEntry> {
        if candidate.is_empty() {
            return None;
        }
        self.assets
            .iter()
            .find(|entry| entry.url() == candidate || entry.url().ends_with(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ContentEncoding, HarContent, HarRequest, HarResponse};

    fn entry(url: &str, mime: &str, text: &str) -> HarEntry {
        HarEntry {
            request: HarRequest {
                url: url.to_string(),
            },
            response: HarResponse {
                content: HarContent {
                    mime_type: mime.to_string(),
                    text: Some(text.to_string()),
                    encoding: ContentEncoding::Identity,
                },
            },
        }
    }

    fn index() -> AssetIndex {
        AssetIndex::new(vec![
            entry("https://cdn.test/app.js", "text/javascript", "js"),
            entry("https://origin.test/style.css", "text/css", "css"),
            entry("https://mirror.test/app.js", "text/javascript", "mirror js"),
        ])
    }

    #[test]
    fn test_resolve_by_exact_url() {
        let idx = index();
        let hit = idx.resolve("https://origin.test/style.css").unwrap();
        assert_eq!(hit.body_text(), "css");
    }

    #[test]
    fn test_resolve_by_path_suffix() {
        let idx = index();
        let hit = idx.resolve("style.css").unwrap();
        assert_eq!(hit.url(), "https://origin.test/style.css");
        let hit = idx.resolve("/style.css").unwrap();
        assert_eq!(hit.url(), "https://origin.test/style.css");
    }

    #[test]
    fn test_suffix_tie_goes_to_first_in_archive_order() {
        let idx = index();
        // Both cdn.test and mirror.test serve /app.js; first wins, always.
        let hit = idx.resolve("app.js").unwrap();
        assert_eq!(hit.url(), "https://cdn.test/app.js");
    }

    #[test]
    fn test_unknown_candidate_is_not_found() {
        let idx = index();
        assert!(idx.resolve("missing.png").is_none());
        assert!(idx.resolve("https://elsewhere.test/app.js/extra").is_none());
    }

    #[test]
    fn test_empty_candidate_is_not_found() {
        let idx = index();
        assert!(idx.resolve("").is_none());
    }

    #[test]
    fn test_protocol_relative_candidate_matches_by_suffix() {
        let idx = index();
        // "https://cdn.test/app.js" ends with "//cdn.test/app.js".
        let hit = idx.resolve("//cdn.test/app.js").unwrap();
        assert_eq!(hit.url(), "https://cdn.test/app.js");
    }
}
