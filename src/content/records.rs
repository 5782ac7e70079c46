//! Article and project records.
//!
//! The same shapes back both sources: local tables in `profile.toml` and
//! the decoded remote feeds.

use serde::{Deserialize, Serialize};

/// Average adult reading speed, used for "N min read" estimates.
const WORDS_PER_MINUTE: usize = 200;

/// A blog post (local or from the articles feed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub title: String,
    pub url: String,
    /// Plain-text excerpt (HTML-stripped for feed records).
    pub description: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Display string like "8 min read".
    pub read_time: Option<String>,
    pub category: String,
    pub featured: bool,
}

/// A showcase project (local or from the projects feed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    /// Plain-text description (HTML-stripped for feed records).
    pub description: String,
    /// Technology badges.
    pub tech: Vec<String>,
    /// Repository URL.
    pub repo: Option<String>,
    /// Live demo URL.
    pub demo: Option<String>,
    pub featured: bool,
}

/// Estimate reading time from text, e.g. "3 min read".
///
/// Never returns less than one minute.
pub fn estimate_read_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
