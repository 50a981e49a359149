//! URL cleanup for upstream attachment and lookup values.
//!
//! Upstream URLs arrive with encoded-space prefixes, doubled slashes from
//! naive string concatenation, and stray whitespace. The pipeline here is
//! deterministic and total: malformed input yields a best-effort cleaned
//! string, never an error.

use std::sync::LazyLock;

use regex::Regex;

/// Regex to strip a leading run of literal `%20` tokens and whitespace.
static LEADING_JUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:%20|\s)+").expect("valid regex"));

/// Regex to collapse the slash run after a protocol down to exactly two.
static PROTOCOL_SLASHES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(https?):/{2,}").expect("valid regex"));

/// Regex to collapse duplicate slashes not preceded by a colon.
static DOUBLE_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^:/])/{2,}").expect("valid regex"));

/// Normalizes a single URL string.
///
/// The pipeline, in order:
/// 1. Strip a leading run of `%20` tokens and real whitespace
/// 2. Collapse 2+ slashes immediately after `http:`/`https:` to exactly 2
/// 3. Collapse any other run of 2+ slashes to a single slash
#[must_use]
pub fn normalize_url(input: &str) -> String {
    let trimmed = LEADING_JUNK_RE.replace(input, "");
    let protocol_fixed = PROTOCOL_SLASHES_RE.replace_all(&trimmed, "${1}://");
    DOUBLE_SLASH_RE
        .replace_all(&protocol_fixed, "${1}/")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_protocol_slashes() {
        assert_eq!(
            normalize_url("https:////a.com//b///c.png"),
            "https://a.com/b/c.png"
        );
    }

    #[test]
    fn leaves_clean_url_unchanged() {
        assert_eq!(
            normalize_url("https://a.com/b/c.png"),
            "https://a.com/b/c.png"
        );
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_url(" %20%20https://a.com//x.jpg");
        assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn strips_encoded_space_prefix() {
        assert_eq!(normalize_url("%20https://a.com/x"), "https://a.com/x");
    }

    #[test]
    fn strips_mixed_leading_whitespace() {
        assert_eq!(
            normalize_url("  %20 https://a.com/x"),
            "https://a.com/x"
        );
    }

    #[test]
    fn collapses_internal_slashes_without_protocol() {
        assert_eq!(normalize_url("a.com//b//c"), "a.com/b/c");
    }

    #[test]
    fn handles_uppercase_protocol() {
        assert_eq!(normalize_url("HTTPS:///a.com"), "HTTPS://a.com");
    }

    #[test]
    fn passes_through_non_url_text() {
        assert_eq!(normalize_url("not a url"), "not a url");
    }
}
