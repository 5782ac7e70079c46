//! `[site]` configuration: site info, navigation, and the section list.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "MD Wahid"
//! author = "MD Wahid"
//! description = "Full-stack software engineer"
//! url = "https://example.com"
//!
//! [site.nav]
//! brand = "MD WAHID"
//! activation_line = 100.0
//!
//! [[site.sections]]
//! id = "home"
//! label = "Home"
//! ```
//!
//! Section order in the config file is load-bearing: it is both the render
//! order of the page and the tie-break priority of the scroll-spy scan, so
//! it must match the visual top-to-bottom order of the page.

use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::scrollspy::{Section, SectionId, SectionRegistry, SectionRegistryError};

// ============================================================================
// [site]
// ============================================================================

/// The `[site]` table: info, nav, and the ordered section list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site metadata (title, author, url, ...).
    pub info: SiteInfoConfig,

    /// Navigation bar settings.
    pub nav: NavConfig,

    /// Ordered page sections (`[[site.sections]]`).
    pub sections: Vec<SectionEntry>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            info: SiteInfoConfig::default(),
            nav: NavConfig::default(),
            sections: SectionEntry::default_sections(),
        }
    }
}

impl SiteSectionConfig {
    /// Build the scroll-spy registry from the configured section list.
    pub fn section_registry(&self) -> Result<SectionRegistry, SectionRegistryError> {
        SectionRegistry::new(
            self.sections
                .iter()
                .map(|entry| Section::new(entry.id.as_str(), entry.label.as_str()))
                .collect(),
        )
    }

    /// Validate the section list.
    ///
    /// An empty or inconsistent registry is refused here, at configuration
    /// time, so the tracker never has to operate on one.
    pub fn validate_sections(&self, diag: &mut ConfigDiagnostics) {
        const FIELD: FieldPath = FieldPath("site.sections");

        if self.sections.is_empty() {
            diag.error_with_hint(
                FIELD,
                "no sections configured",
                "add at least one [[site.sections]] entry (id + label)",
            );
            return;
        }

        for entry in &self.sections {
            let id = SectionId::new(entry.id.clone());
            if !id.is_anchor_safe() {
                diag.error_with_hint(
                    FIELD,
                    format!("section id `{}` is not anchor-safe", entry.id),
                    "use lowercase letters, digits, and hyphens (e.g. \"my-work\")",
                );
            }
            if entry.label.trim().is_empty() {
                diag.error(
                    FIELD,
                    format!("section `{}` has an empty label", entry.id),
                );
            }
        }

        if let Err(SectionRegistryError::DuplicateId(id)) = self.section_registry() {
            diag.error_with_hint(
                FIELD,
                format!("duplicate section id `{id}`"),
                "section ids must be unique; order defines scroll-spy priority",
            );
        }
    }
}

// ============================================================================
// [site.info]
// ============================================================================

/// Site metadata injected into the page head and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title (browser tab, OpenGraph).
    pub title: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Site description (meta description, hero fallback).
    pub description: String,

    /// Site URL (e.g., "https://example.com"). Required for sitemap output.
    pub url: Option<String>,

    /// Language code (e.g., "en").
    pub language: String,

    /// Copyright notice for the footer.
    pub copyright: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            copyright: String::new(),
        }
    }
}

impl SiteInfoConfig {
    /// Validate site metadata.
    ///
    /// # Checks
    /// - If the sitemap is enabled, `url` must be set
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self, sitemap_enabled: bool, diag: &mut ConfigDiagnostics) {
        const URL_FIELD: FieldPath = FieldPath("site.info.url");

        if sitemap_enabled && self.url.is_none() {
            diag.error_with_hint(
                URL_FIELD,
                "build.sitemap is enabled but site.info.url is not configured",
                "set site.info.url, e.g.: \"https://example.com\"",
            );
        }

        if let Some(url_str) = &self.url {
            validate_http_url(url_str, URL_FIELD, diag);
        }
    }
}

/// Shared http(s) URL check using the url crate for strict validation.
pub fn validate_http_url(url_str: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    match url::Url::parse(url_str) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    "use format like https://example.com",
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(
                    field,
                    "URL must have a valid host",
                    "use format like https://example.com",
                );
            }
        }
        Err(e) => {
            diag.error_with_hint(
                field,
                format!("invalid URL: {}", e),
                "use format like https://example.com",
            );
        }
    }
}

// ============================================================================
// [site.nav]
// ============================================================================

/// Navigation bar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Brand text shown in the nav bar (falls back to site title).
    pub brand: String,

    /// Offset of the scroll-spy activation line below the viewport top,
    /// in CSS pixels. A section is highlighted while this line falls
    /// inside its extent.
    pub activation_line: f64,

    /// Smooth-scroll to sections when nav links are clicked.
    pub smooth_scroll: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            brand: String::new(),
            activation_line: crate::scrollspy::DEFAULT_ACTIVATION_LINE,
            smooth_scroll: true,
        }
    }
}

impl NavConfig {
    /// Brand text, falling back to the site title.
    pub fn brand_or<'a>(&'a self, title: &'a str) -> &'a str {
        if self.brand.is_empty() {
            title
        } else {
            &self.brand
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        const FIELD: FieldPath = FieldPath("site.nav.activation_line");

        if !self.activation_line.is_finite() || self.activation_line < 0.0 {
            diag.error_with_hint(
                FIELD,
                format!("activation_line must be finite and >= 0, got {}", self.activation_line),
                "the default is 100.0",
            );
        }
    }
}

// ============================================================================
// [[site.sections]]
// ============================================================================

/// One entry of the ordered section list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Anchor id (e.g. "about" for `#about`).
    pub id: String,
    /// Navigation label (e.g. "About").
    pub label: String,
}

impl SectionEntry {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// The conventional portfolio layout, top to bottom.
    pub fn default_sections() -> Vec<Self> {
        vec![
            Self::new("home", "Home"),
            Self::new("about", "About"),
            Self::new("projects", "Projects"),
            Self::new("blog", "Blog"),
            Self::new("contact", "Contact"),
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::config::types::ConfigDiagnostics;

    #[test]
    fn test_default_sections() {
        let config = test_parse_config("");
        let ids: Vec<_> = config.site.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["home", "about", "projects", "blog", "contact"]);

        let mut diag = ConfigDiagnostics::new();
        config.site.validate_sections(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_custom_sections_keep_order() {
        let config = test_parse_config(
            "[[site.sections]]\nid = \"home\"\nlabel = \"Start\"\n\
             [[site.sections]]\nid = \"work\"\nlabel = \"Work\"\n",
        );
        let registry = config.site.section_registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.first_id().unwrap().as_str(), "home");
    }

    #[test]
    fn test_duplicate_section_id_is_config_error() {
        let config = test_parse_config(
            "[[site.sections]]\nid = \"home\"\nlabel = \"Home\"\n\
             [[site.sections]]\nid = \"home\"\nlabel = \"Again\"\n",
        );
        let mut diag = ConfigDiagnostics::new();
        config.site.validate_sections(&mut diag);
        assert!(diag.has_errors());
        assert!(diag.errors()[0].message.contains("duplicate section id"));
    }

    #[test]
    fn test_empty_sections_is_config_error() {
        // An explicit empty list (as opposed to the absent default)
        let config = test_parse_config("[site]\nsections = []\n");
        let mut diag = ConfigDiagnostics::new();
        config.site.validate_sections(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_unsafe_anchor_id_is_config_error() {
        let config =
            test_parse_config("[[site.sections]]\nid = \"My Work\"\nlabel = \"Work\"\n");
        let mut diag = ConfigDiagnostics::new();
        config.site.validate_sections(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_nav_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.nav.activation_line, 100.0);
        assert!(config.site.nav.smooth_scroll);
        assert_eq!(config.site.nav.brand_or("Fallback"), "Fallback");
    }

    #[test]
    fn test_nav_activation_line_validation() {
        let config = test_parse_config("[site.nav]\nactivation_line = -5.0\n");
        let mut diag = ConfigDiagnostics::new();
        config.site.nav.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_site_url_validation() {
        let config = crate::config::SiteConfig::from_str(
            "[site.info]\ntitle = \"Test\"\nurl = \"ftp://example.com\"\n",
        )
        .unwrap();
        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(false, &mut diag);
        assert!(diag.has_errors());
    }
}
