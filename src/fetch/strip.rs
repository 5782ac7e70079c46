//! Light HTML-stripping for feed descriptions.
//!
//! Remote endpoints return descriptions with markup in them; the cards
//! render plain text. Tags are dropped via a real HTML parse (not a regex
//! over angle brackets), entities decoded, whitespace collapsed, and the
//! result capped to a display length.

use std::sync::LazyLock;

use regex::Regex;

/// Longest description shown on a card.
pub const MAX_DESCRIPTION_CHARS: usize = 280;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Strip markup from an HTML fragment, returning collapsed plain text.
pub fn strip_html(input: &str) -> String {
    let text = match tl::parse(input, tl::ParserOptions::default()) {
        Ok(dom) => {
            let mut out = String::with_capacity(input.len());
            for node in dom.nodes() {
                if let tl::Node::Raw(bytes) = node {
                    out.push_str(&bytes.as_utf8_str());
                    out.push(' ');
                }
            }
            out
        }
        // Unparseable input is kept as-is; entity decoding and whitespace
        // collapsing below still apply
        Err(_) => input.to_string(),
    };

    let text = crate::utils::html::unescape(&text);
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Strip and cap a description for card display.
pub fn clean_description(input: &str) -> String {
    truncate_chars(&strip_html(input), MAX_DESCRIPTION_CHARS)
}

/// Truncate to at most `max` characters on a char boundary, appending an
/// ellipsis when anything was cut.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
