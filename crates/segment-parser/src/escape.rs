//! Escaping transforms
//!
//! Two transforms are applied to every key and value of a condition:
//! - `Escape::Display` when a stored filter is loaded for rendering
//!   (HTML attribute escaping)
//! - `Escape::Storage` when a submitted filter is saved
//!   (markup stripping and whitespace normalization)

use regex::Regex;
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").expect("valid entity pattern")
});

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)[^>]*?>.*?</\s*(?:script|style)\s*>")
        .expect("valid script pattern")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("valid tag pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid whitespace pattern"));

static OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("valid octet pattern"));

static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid space pattern"));

/// Escaping transform selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Output escaping for values placed in markup attributes
    Display,
    /// Storage-safe text: markup and active content removed
    Storage,
}

impl Escape {
    pub fn apply(&self, input: &str) -> String {
        match self {
            Escape::Display => escape_attr(input),
            Escape::Storage => sanitize_text(input),
        }
    }
}

/// Encode `& < > " '` as HTML entities.
///
/// An `&` that already starts a well-formed entity is left alone, so escaping
/// twice yields the same text as escaping once.
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (pos, ch) in input.char_indices() {
        match ch {
            '&' if ENTITY.is_match(&input[pos..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reduce user text to a single storage-safe line.
///
/// Drops `<script>`/`<style>` blocks and tags, encodes a leftover `<`,
/// collapses whitespace (line breaks and tabs included), removes
/// percent-encoded octets and trims.
pub fn sanitize_text(input: &str) -> String {
    let mut filtered = input.to_string();

    if filtered.contains('<') {
        filtered = SCRIPT_OR_STYLE.replace_all(&filtered, "").into_owned();
        filtered = TAG.replace_all(&filtered, "").into_owned();
        filtered = filtered.replace('<', "&lt;");
    }

    filtered = WHITESPACE.replace_all(&filtered, " ").trim().to_string();

    let mut found_octets = false;
    while OCTET.is_match(&filtered) {
        filtered = OCTET.replace_all(&filtered, "").into_owned();
        found_octets = true;
    }
    if found_octets {
        filtered = SPACES.replace_all(&filtered, " ").trim().to_string();
    }

    filtered
}
