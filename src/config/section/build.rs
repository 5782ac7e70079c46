//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"     # profile.toml + about.md
//! assets = "assets"       # copied verbatim to the output
//! output = "dist"
//! robots = true
//!
//! [build.sitemap]
//! enable = true
//! path = "sitemap.xml"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content directory (profile.toml, about.md).
    pub content: PathBuf,

    /// Static assets directory, copied verbatim.
    pub assets: PathBuf,

    /// Output directory.
    pub output: PathBuf,

    /// Sitemap generation.
    pub sitemap: SitemapConfig,

    /// Write robots.txt next to the sitemap.
    pub robots: bool,

    /// Clean output directory before building (CLI flag, not persisted).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            assets: PathBuf::from("assets"),
            output: PathBuf::from("dist"),
            sitemap: SitemapConfig::default(),
            robots: true,
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    /// Path of `content/profile.toml`.
    pub fn profile_path(&self) -> PathBuf {
        self.content.join("profile.toml")
    }

    /// Path of `content/about.md`.
    pub fn about_path(&self) -> PathBuf {
        self.content.join("about.md")
    }
}

/// Sitemap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Generate sitemap.xml during `folio build`.
    pub enable: bool,

    /// Output filename, relative to the output directory.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: PathBuf::from("sitemap.xml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.assets, PathBuf::from("assets"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.sitemap.enable);
        assert!(config.build.robots);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_overrides() {
        let config =
            test_parse_config("[build]\noutput = \"public\"\nrobots = false\n[build.sitemap]\nenable = false\n");
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.robots);
        assert!(!config.build.sitemap.enable);
    }
}
