//! Narrative text derivation.
//!
//! The rich-text editor produces HTML; the plain text derived from it is the
//! authoritative source for length checks.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const NARRATIVE_MIN_CHARS: usize = 100;
pub const NARRATIVE_MAX_CHARS: usize = 5000;

/// Default editor content of an empty draft.
pub const EMPTY_NARRATIVE_HTML: &str = "<p></p>";

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script\s*>").expect("static regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("static regex"));

/// Both representations of the narrative, kept in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub html: String,
    pub plain: String,
}

impl Narrative {
    /// Sanitize editor output and derive its clamped plain text.
    pub fn from_html(html: &str) -> Self {
        let html = sanitize_html(html);
        let plain = clamp(&html_to_plain_text(&html));
        Self { html, plain }
    }
}

/// Remove `<script>` blocks.
pub fn sanitize_html(html: &str) -> String {
    SCRIPT_RE.replace_all(html, "").into_owned()
}

/// Text content of an HTML fragment: tags dropped, entities decoded.
pub fn html_to_plain_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    ENTITY_RE
        .replace_all(&stripped, |caps: &Captures<'_>| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Truncate to [`NARRATIVE_MAX_CHARS`] characters.
pub fn clamp(text: &str) -> String {
    match text.char_indices().nth(NARRATIVE_MAX_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(|c| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        _ => return None,
    };
    Some(decoded.to_string())
}
