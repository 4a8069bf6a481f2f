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

//! Resource reference rewriting for the main document.
//!
//! Known limitation: only double-quoted `src="..."` / `href="..."`
//! attributes are matched. Single-quoted and unquoted attribute syntax is
//! out of scope.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use url::Url;

use crate::index::AssetIndex;

fn attr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"(src|href)="([^"]+)""#).expect("attribute pattern compiles"))
}

/// Rewrite every `src`/`href` attribute value in one linear pass.
///
/// Absolute (`http`/`https`) and protocol-relative (`//`) values that
/// resolve against the index are replaced with the path component of the
/// matched asset's URL; everything else is left untouched. Applying this to
/// its own output is a no-op, since rewritten values no longer carry a
/// scheme.
pub fn rewrite_references(body: &str, assets: &AssetIndex) -> String {
    attr_pattern()
        .replace_all(body, |caps: &Captures<'_>| {
            format!("{}=\"{}\"", &caps[1], rewrite_value(&caps[2], assets))
        })
        .into_owned()
}

fn rewrite_value<'a>(value: &'a str, assets: &AssetIndex) -> Cow<'a, str> {
    if !value.starts_with("http") && !value.starts_with("//") {
        // Already relative; resolves against this server as-is.
        return Cow::Borrowed(value);
    }
    match assets.resolve(value) {
        Some(asset) => match Url::parse(asset.url()) {
            Ok(parsed) => Cow::Owned(parsed.path().to_owned()),
            // Recorded URL is not absolute; leave the reference alone.
            Err(_) => Cow::Borrowed(value),
        },
        // Unmapped external reference: keep it pointing off-server rather
        // than breaking it.
        None => Cow::Borrowed(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ContentEncoding, HarContent, HarEntry, HarRequest, HarResponse};

    fn entry(url: &str, mime: &str) -> HarEntry {
        HarEntry {
            request: HarRequest {
                url: url.to_string(),
            },
            response: HarResponse {
                content: HarContent {
                    mime_type: mime.to_string(),
                    text: Some(String::new()),
                    encoding: ContentEncoding::Identity,
                },
            },
        }
    }

    fn assets() -> AssetIndex {
        AssetIndex::new(vec![
            entry("https://cdn.test/js/app.js", "text/javascript"),
            entry("https://origin.test/style.css?v=2", "text/css"),
        ])
    }

    #[test]
    fn test_absolute_reference_becomes_path_only() {
        let out = rewrite_references(r#"<script src="https://cdn.test/js/app.js"></script>"#, &assets());
        assert_eq!(out, r#"<script src="/js/app.js"></script>"#);
    }

    #[test]
    fn test_query_and_origin_are_dropped_from_rewrites() {
        let out = rewrite_references(
            r#"<link href="https://origin.test/style.css?v=2">"#,
            &assets(),
        );
        assert_eq!(out, r#"<link href="/style.css">"#);
    }

    #[test]
    fn test_protocol_relative_reference_is_rewritten() {
        let out = rewrite_references(r#"<script src="//cdn.test/js/app.js">"#, &assets());
        assert_eq!(out, r#"<script src="/js/app.js">"#);
    }

    #[test]
    fn test_relative_reference_is_untouched() {
        let body = r#"<link href="/style.css"><img src="img/logo.png">"#;
        assert_eq!(rewrite_references(body, &assets()), body);
    }

    #[test]
    fn test_unmapped_absolute_reference_is_untouched() {
        let body = r#"<script src="https://unrelated.test/lib.js"></script>"#;
        assert_eq!(rewrite_references(body, &assets()), body);
    }

    #[test]
    fn test_rewrite_is_idempotent_on_its_own_output() {
        let body = r#"<script src="https://cdn.test/js/app.js"></script><link href="/style.css">"#;
        let once = rewrite_references(body, &assets());
        let twice = rewrite_references(&once, &assets());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_body_rewrites_to_empty() {
        assert_eq!(rewrite_references("", &assets()), "");
    }

    #[test]
    fn test_single_quoted_attributes_are_out_of_scope() {
        // Documented limitation carried over from the capture tooling.
        let body = r#"<script src='https://cdn.test/js/app.js'></script>"#;
        assert_eq!(rewrite_references(body, &assets()), body);
    }
}
