//! Token flattening for text and lookup fields.
//!
//! Leader names, tags, statuses, counties, and emails all arrive through
//! the same loosely-typed lookup plumbing as photos: plain strings,
//! linked-record objects, JSON-encoded arrays, and semicolon- or
//! comma-joined strings. [`normalize_text_list`] and [`normalize_lookup`]
//! flatten any of those into one comma-joined string of unique tokens.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Internal record references leak through lookup fields as bare tokens
/// (`rec` prefix + alphanumeric id). They are plumbing, not user data.
static RECORD_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rec[A-Za-z0-9]{12,}$").expect("valid regex"));

/// Regex to collapse multiple whitespace characters into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Which object fields a variant mines for a token before giving up.
#[derive(Debug, Clone, Copy)]
enum Variant {
    /// Linked-record names (leaders, tags, statuses).
    Text,
    /// Generic lookups that may carry emails or free text.
    Lookup,
}

impl Variant {
    const fn preferred_keys(self) -> &'static [&'static str] {
        match self {
            Self::Text => &["name", "Name"],
            Self::Lookup => &["email", "text", "name", "value"],
        }
    }
}

/// Flattens a field value into a comma-joined string of unique tokens.
///
/// Tokens are trimmed, stripped of bracket/quote artifacts, whitespace-
/// collapsed, and de-duplicated in first-seen order. Record-reference
/// tokens are dropped silently. Null input yields an empty string.
#[must_use]
pub fn normalize_text_list(value: &Value) -> String {
    flatten(value, Variant::Text)
}

/// [`normalize_text_list`] variant for generic lookup fields.
///
/// Object shapes prefer, in order, an `email`, `text`, `name`, then
/// `value` field as the token source before falling back to recursing
/// into all of the object's values.
#[must_use]
pub fn normalize_lookup(value: &Value) -> String {
    flatten(value, Variant::Lookup)
}

fn flatten(value: &Value, variant: Variant) -> String {
    let mut tokens = Vec::new();
    let mut seen = HashSet::new();
    collect(value, variant, &mut tokens, &mut seen);
    tokens.join(", ")
}

fn collect(value: &Value, variant: Variant, tokens: &mut Vec<String>, seen: &mut HashSet<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) | Value::Array(_) => collect(item, variant, tokens, seen),
                    // A flattened-JSON-array artifact: `a","b` pieces.
                    Value::String(s) if s.contains("\",\"") => {
                        for piece in s.split("\",\"") {
                            push_token(piece, tokens, seen);
                        }
                    }
                    other => push_scalar(other, tokens, seen),
                }
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(parsed @ Value::Array(_)) => collect(&parsed, variant, tokens, seen),
                    Ok(other) => push_scalar(&other, tokens, seen),
                    Err(_) => split_joined(trimmed, tokens, seen),
                }
            } else {
                split_joined(trimmed, tokens, seen);
            }
        }
        Value::Object(obj) => {
            for key in variant.preferred_keys() {
                if let Some(preferred) = obj.get(*key) {
                    push_scalar(preferred, tokens, seen);
                    return;
                }
            }
            match variant {
                // Opaque object with no usable field: keep its serialized
                // form as a single best-effort token.
                Variant::Text => push_token(&value.to_string(), tokens, seen),
                Variant::Lookup => {
                    for nested in obj.values() {
                        collect(nested, variant, tokens, seen);
                    }
                }
            }
        }
        Value::Null => {}
        other => push_scalar(other, tokens, seen),
    }
}

/// Splits a semicolon- or comma-joined string into cleaned tokens.
fn split_joined(s: &str, tokens: &mut Vec<String>, seen: &mut HashSet<String>) {
    for piece in s.split([';', ',']) {
        push_token(piece, tokens, seen);
    }
}

fn push_scalar(value: &Value, tokens: &mut Vec<String>, seen: &mut HashSet<String>) {
    match value {
        Value::String(s) => push_token(s, tokens, seen),
        Value::Number(n) => push_token(&n.to_string(), tokens, seen),
        Value::Bool(b) => push_token(&b.to_string(), tokens, seen),
        _ => {}
    }
}

fn push_token(raw: &str, tokens: &mut Vec<String>, seen: &mut HashSet<String>) {
    if let Some(token) = clean_token(raw)
        && seen.insert(token.clone())
    {
        tokens.push(token);
    }
}

/// Cleans one raw token: trim, strip bracket/quote artifacts, collapse
/// internal whitespace. Empty results and record references are dropped.
fn clean_token(raw: &str) -> Option<String> {
    let stripped = raw
        .trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '{' | '}' | '"' | '\''));
    let collapsed = WHITESPACE_RE.replace_all(stripped, " ");
    let token = collapsed.trim();

    if token.is_empty() || RECORD_REF_RE.is_match(token) {
        return None;
    }
    Some(token.to_owned())
}
