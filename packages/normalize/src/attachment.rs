//! Best-URL selection from attachment-like upstream values.

use serde_json::Value;

/// Picks the best representative URL from one attachment-like value.
///
/// For object shapes the preference order is the large thumbnail, the
/// full-size thumbnail, then the attachment's primary `url`. Bare strings
/// pass through only when they carry an `http(s)://` prefix, so plain
/// lookup tokens (names, tags) are never misclassified as photos.
#[must_use]
pub fn pick_attachment_url(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => {
            let thumbnail = |size: &str| {
                obj.get("thumbnails")?
                    .get(size)?
                    .get("url")?
                    .as_str()
                    .map(ToOwned::to_owned)
            };

            thumbnail("large")
                .or_else(|| thumbnail("full"))
                .or_else(|| obj.get("url")?.as_str().map(ToOwned::to_owned))
        }
        Value::String(s) => {
            let lower = s.trim_start().to_lowercase();
            if lower.starts_with("http://") || lower.starts_with("https://") {
                Some(s.clone())
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prefers_large_thumbnail() {
        let value = json!({
            "url": "https://a.com/orig.png",
            "thumbnails": {
                "full": { "url": "https://a.com/full.png" },
                "large": { "url": "https://a.com/large.png" },
            },
        });
        assert_eq!(
            pick_attachment_url(&value).as_deref(),
            Some("https://a.com/large.png")
        );
    }

    #[test]
    fn falls_back_to_full_thumbnail() {
        let value = json!({
            "url": "https://a.com/orig.png",
            "thumbnails": { "full": { "url": "https://a.com/full.png" } },
        });
        assert_eq!(
            pick_attachment_url(&value).as_deref(),
            Some("https://a.com/full.png")
        );
    }

    #[test]
    fn falls_back_to_primary_url() {
        let value = json!({ "url": "https://a.com/orig.png" });
        assert_eq!(
            pick_attachment_url(&value).as_deref(),
            Some("https://a.com/orig.png")
        );
    }

    #[test]
    fn accepts_plain_url_string() {
        let value = json!("HTTP://a.com/x.jpg");
        assert_eq!(
            pick_attachment_url(&value).as_deref(),
            Some("HTTP://a.com/x.jpg")
        );
    }

    #[test]
    fn rejects_non_url_string() {
        assert_eq!(pick_attachment_url(&json!("Jane Doe")), None);
    }

    #[test]
    fn rejects_object_without_urls() {
        assert_eq!(pick_attachment_url(&json!({ "filename": "x.png" })), None);
    }

    #[test]
    fn rejects_null_and_numbers() {
        assert_eq!(pick_attachment_url(&Value::Null), None);
        assert_eq!(pick_attachment_url(&json!(42)), None);
    }
}
