//! `[feeds]` configuration: the two remote record sources.
//!
//! The blog listing and project showcase can be populated from remote
//! endpoints returning a JSON array of records. Both feeds are optional;
//! when disabled (or unreachable) the local records from
//! `content/profile.toml` are used instead.
//!
//! # Example
//!
//! ```toml
//! [feeds.articles]
//! enable = true
//! url = "https://dev.to/api/articles?username=me"
//!
//! [feeds.projects]
//! enable = true
//! url = "https://api.github.com/users/me/repos?sort=updated"
//! timeout = 10
//! limit = 6
//! ```

use serde::{Deserialize, Serialize};

use crate::config::section::site::validate_http_url;
use crate::config::types::{ConfigDiagnostics, FieldPath};

/// The `[feeds]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Remote articles endpoint (blog listing).
    pub articles: FeedConfig,

    /// Remote projects endpoint (project showcase).
    pub projects: FeedConfig,

    /// Skip all remote fetches this run (--offline CLI flag, not persisted).
    #[serde(skip)]
    pub offline: bool,
}

impl FeedsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.articles.validate(
            FieldPath("feeds.articles.enable"),
            FieldPath("feeds.articles.url"),
            diag,
        );
        self.projects.validate(
            FieldPath("feeds.projects.enable"),
            FieldPath("feeds.projects.url"),
            diag,
        );
    }
}

/// One remote feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Fetch this feed during builds.
    pub enable: bool,

    /// Endpoint URL returning a JSON array of records.
    pub url: Option<String>,

    /// Request timeout in seconds. One attempt, no retries.
    pub timeout: u64,

    /// Keep at most this many records.
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: false,
            url: None,
            timeout: 10,
            limit: 12,
        }
    }
}

impl FeedConfig {
    fn validate(
        &self,
        enable_field: FieldPath,
        url_field: FieldPath,
        diag: &mut ConfigDiagnostics,
    ) {
        if !self.enable {
            return;
        }

        match &self.url {
            None => diag.error_with_hint(
                url_field,
                format!("{} is true but no url is configured", enable_field),
                "set the endpoint url or disable the feed",
            ),
            Some(url) => validate_http_url(url, url_field, diag),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::config::types::ConfigDiagnostics;

    #[test]
    fn test_feeds_default_disabled() {
        let config = test_parse_config("");
        assert!(!config.feeds.articles.enable);
        assert!(!config.feeds.projects.enable);
        assert_eq!(config.feeds.articles.timeout, 10);
        assert_eq!(config.feeds.articles.limit, 12);

        let mut diag = ConfigDiagnostics::new();
        config.feeds.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_enabled_feed_requires_url() {
        let config = test_parse_config("[feeds.articles]\nenable = true\n");
        let mut diag = ConfigDiagnostics::new();
        config.feeds.validate(&mut diag);
        assert!(diag.has_errors());
        assert!(diag.errors()[0].message.contains("feeds.articles.enable"));
    }

    #[test]
    fn test_enabled_feed_with_valid_url() {
        let config = test_parse_config(
            "[feeds.projects]\nenable = true\nurl = \"https://api.github.com/users/me/repos\"\n",
        );
        let mut diag = ConfigDiagnostics::new();
        config.feeds.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_feed_url_must_be_http() {
        let config =
            test_parse_config("[feeds.articles]\nenable = true\nurl = \"file:///etc/passwd\"\n");
        let mut diag = ConfigDiagnostics::new();
        config.feeds.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_feed_overrides() {
        let config = test_parse_config(
            "[feeds.articles]\nenable = true\nurl = \"https://dev.to/api/articles?username=me\"\ntimeout = 3\nlimit = 4\n",
        );
        assert_eq!(config.feeds.articles.timeout, 3);
        assert_eq!(config.feeds.articles.limit, 4);
    }
}
