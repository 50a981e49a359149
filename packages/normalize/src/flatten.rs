//! Recursive flattening of arbitrarily-shaped field values into URL lists.
//!
//! A photo field can arrive as an attachment object array, a lookup/rollup
//! wrapper around one, a JSON-encoded string of either, or a plain
//! comma-joined string of URLs. [`collect_photo_urls`] walks all of those
//! depth-first and produces one ordered, de-duplicated list of clean URLs.

use std::collections::HashSet;

use serde_json::Value;

use crate::attachment::pick_attachment_url;
use crate::url::normalize_url;

/// Flattens a field value of arbitrary shape into an ordered set of
/// normalized URLs.
///
/// De-duplication is by exact string equality after normalization; order
/// is first-seen during the walk. Shapes that yield no URL contribute
/// nothing; this function cannot fail.
#[must_use]
pub fn collect_photo_urls(value: &Value) -> Vec<String> {
    let mut urls = Vec::new();
    let mut seen = HashSet::new();
    walk(value, &mut urls, &mut seen);
    urls
}

fn walk(value: &Value, urls: &mut Vec<String>, seen: &mut HashSet<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, urls, seen);
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if looks_like_json(trimmed)
                && let Ok(parsed) = serde_json::from_str::<Value>(trimmed)
            {
                walk(&parsed, urls, seen);
                return;
            }
            for part in trimmed.split(',') {
                let candidate = Value::String(part.trim().to_owned());
                if let Some(url) = pick_attachment_url(&candidate) {
                    push_unique(normalize_url(&url), urls, seen);
                }
            }
        }
        Value::Object(obj) => {
            if obj.contains_key("url") || obj.contains_key("thumbnails") {
                if let Some(url) = pick_attachment_url(value) {
                    push_unique(normalize_url(&url), urls, seen);
                }
            } else {
                // Lookup/rollup wrappers nest the real values one level down.
                for nested in obj.values() {
                    walk(nested, urls, seen);
                }
            }
        }
        // Null, booleans, and numbers carry no URL.
        _ => {}
    }
}

/// Whether a trimmed string is bracketed like a JSON array or object.
fn looks_like_json(s: &str) -> bool {
    (s.starts_with('[') && s.ends_with(']')) || (s.starts_with('{') && s.ends_with('}'))
}

fn push_unique(url: String, urls: &mut Vec<String>, seen: &mut HashSet<String>) {
    if seen.insert(url.clone()) {
        urls.push(url);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dedups_repeated_urls() {
        let value = json!(["http://a.com/x.png", "http://a.com/x.png"]);
        assert_eq!(collect_photo_urls(&value), vec!["http://a.com/x.png"]);
    }

    #[test]
    fn json_encoded_array_matches_real_array() {
        let encoded = json!(r#"["http://a.com/x.png","http://a.com/x.png"]"#);
        assert_eq!(collect_photo_urls(&encoded), vec!["http://a.com/x.png"]);
    }

    #[test]
    fn extracts_thumbnails_from_attachment_array() {
        let value = json!([
            {
                "url": "https://a.com/one.png",
                "thumbnails": { "large": { "url": "https://a.com/one-lg.png" } },
            },
            { "url": "https://a.com/two.png" },
        ]);
        assert_eq!(
            collect_photo_urls(&value),
            vec!["https://a.com/one-lg.png", "https://a.com/two.png"]
        );
    }

    #[test]
    fn recurses_into_lookup_wrapper_objects() {
        let value = json!({
            "linked": [["https://a.com/x.png"], "https://a.com/y.png"],
        });
        assert_eq!(
            collect_photo_urls(&value),
            vec!["https://a.com/x.png", "https://a.com/y.png"]
        );
    }

    #[test]
    fn splits_comma_joined_url_string() {
        let value = json!("https://a.com/x.png, https://b.com/y.png");
        assert_eq!(
            collect_photo_urls(&value),
            vec!["https://a.com/x.png", "https://b.com/y.png"]
        );
    }

    #[test]
    fn parses_json_object_string() {
        let value = json!(r#"{"url": "https://a.com/x.png"}"#);
        assert_eq!(collect_photo_urls(&value), vec!["https://a.com/x.png"]);
    }

    #[test]
    fn normalizes_collected_urls() {
        let value = json!(["https:////a.com//b.png"]);
        assert_eq!(collect_photo_urls(&value), vec!["https://a.com/b.png"]);
    }

    #[test]
    fn preserves_discovery_order() {
        let value = json!([
            "https://b.com/2.png",
            "https://a.com/1.png",
            "https://b.com/2.png",
        ]);
        assert_eq!(
            collect_photo_urls(&value),
            vec!["https://b.com/2.png", "https://a.com/1.png"]
        );
    }

    #[test]
    fn non_url_shapes_contribute_nothing() {
        assert!(collect_photo_urls(&Value::Null).is_empty());
        assert!(collect_photo_urls(&json!(42)).is_empty());
        assert!(collect_photo_urls(&json!("Jane Doe, John Doe")).is_empty());
        assert!(collect_photo_urls(&json!({ "filename": "x.png" })).is_empty());
    }

    #[test]
    fn unparseable_json_lookalike_falls_back_to_splitting() {
        // Trailing comma makes the parse fail; the comma split then finds
        // no URL-shaped parts.
        let value = json!(r#"["https://a.com/x.png",]"#);
        assert!(collect_photo_urls(&value).is_empty());
    }
}
