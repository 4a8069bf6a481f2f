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

//! Immutable replay context assembled once at startup.

use crate::archive::{Har, HarEntry};
use crate::error::{HarError, HarResult};
use crate::index::AssetIndex;
use crate::rewrite::rewrite_references;

/// Everything a request handler needs, built before the listener starts.
///
/// The archive is consumed during construction and nothing here mutates
/// afterwards, so handlers share it across connections without
/// coordination.
#[derive(Debug, Clone)]
pub struct ReplayContext {
    main: HarEntry,
    assets: AssetIndex,
    body: String,
}

impl ReplayContext {
    /// Select the main document, index the remaining entries, and rewrite
    /// the document's resource references.
    ///
    /// The main document is the first entry in archive order with an HTML
    /// content type; it is selected once and never reselected. An archive
    /// without one has nothing to serve at root and fails here.
    pub fn from_archive(har: Har) -> HarResult<Self> {
        let mut entries = har.log.entries;
        let main_pos = entries
            .iter()
            .position(HarEntry::is_html)
            .ok_or(HarError::NoMainEntry)?;
        let main = entries.remove(main_pos);
        let assets = AssetIndex::new(entries);
        let body = rewrite_references(main.body_text(), &assets);
        Ok(Self { main, assets, body })
    }

    /// The entry served at the root path.
    pub fn main(&self) -> &HarEntry {
        &self.main
    }

    /// Lookup table over every other recorded entry.
    pub fn assets(&self) -> &AssetIndex {
        &self.assets
    }

    /// The main document body with resource references rewritten.
    ///
    /// Computed once here; served verbatim for the server's lifetime.
    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(json: &str) -> Har {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_html_entry_becomes_main() {
        let har = archive(
            r#"{"log":{"entries":[
                {"request":{"url":"https://a.test/app.js"},
                 "response":{"content":{"mimeType":"text/javascript","text":"js"}}},
                {"request":{"url":"https://a.test/"},
                 "response":{"content":{"mimeType":"text/html; charset=utf-8","text":"<html>first</html>"}}},
                {"request":{"url":"https://a.test/frame"},
                 "response":{"content":{"mimeType":"text/html","text":"<html>second</html>"}}}
            ]}}"#,
        );

        let ctx = ReplayContext::from_archive(har).unwrap();
        assert_eq!(ctx.main().url(), "https://a.test/");
        assert_eq!(ctx.body(), "<html>first</html>");
        // Everything except the main entry is indexed, the later HTML
        // document included.
        assert_eq!(ctx.assets().len(), 2);
        assert!(ctx.assets().resolve("https://a.test/frame").is_some());
    }

    #[test]
    fn test_archive_without_html_entry_fails() {
        let har = archive(
            r#"{"log":{"entries":[
                {"request":{"url":"https://a.test/app.js"},
                 "response":{"content":{"mimeType":"text/javascript","text":"js"}}}
            ]}}"#,
        );

        assert!(matches!(
            ReplayContext::from_archive(har),
            Err(HarError::NoMainEntry)
        ));
    }

    #[test]
    fn test_empty_archive_fails() {
        let har = archive(r#"{"log":{"entries":[]}}"#);
        assert!(matches!(
            ReplayContext::from_archive(har),
            Err(HarError::NoMainEntry)
        ));
    }

    #[test]
    fn test_body_is_rewritten_against_assets() {
        let har = archive(
            r#"{"log":{"entries":[
                {"request":{"url":"https://a.test/"},
                 "response":{"content":{"mimeType":"text/html","text":"<script src=\"https://cdn.test/app.js\"></script>"}}},
                {"request":{"url":"https://cdn.test/app.js"},
                 "response":{"content":{"mimeType":"text/javascript","text":"js"}}}
            ]}}"#,
        );

        let ctx = ReplayContext::from_archive(har).unwrap();
        assert_eq!(ctx.body(), r#"<script src="/app.js"></script>"#);
    }

    #[test]
    fn test_main_without_body_yields_empty_rewrite() {
        let har = archive(
            r#"{"log":{"entries":[
                {"request":{"url":"https://a.test/"},
                 "response":{"content":{"mimeType":"text/html"}}}
            ]}}"#,
        );

        let ctx = ReplayContext::from_archive(har).unwrap();
        assert_eq!(ctx.body(), "");
        assert!(ctx.assets().is_empty());
    }
}
