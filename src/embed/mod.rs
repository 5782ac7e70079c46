//! Embedded static resources for Folio.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `asset` - Embedded asset types with content-hash filenames
//! - `css` / `js` - the site stylesheet and client runtime
//! - `serve` - Dev server resources (loading.html, livereload.js)
//! - `init` - Scaffold templates for `folio init`
//!
//! # Usage
//!
//! ```ignore
//! use embed::js::{SITE_JS, SiteJsVars};
//! use embed::serve::{LIVERELOAD_JS, LivereloadVars};
//!
//! let tag = SITE_JS.external_tag_with_vars(&SiteJsVars::from_config(&config));
//! let js = LIVERELOAD_JS.render(&LivereloadVars { ws_port: 35729 });
//! ```

mod asset;
mod template;

// Re-export core types
pub use asset::{AssetKind, EMBED_DIR, EmbeddedAsset};
pub use template::{NoVars, Template, TemplateVars};

pub mod css {
    use super::{AssetKind, EmbeddedAsset, NoVars};

    /// The site stylesheet (no variables).
    pub const SITE_CSS: EmbeddedAsset<NoVars> =
        EmbeddedAsset::new(AssetKind::Css, "site", include_str!("css/site.css"));
}

pub mod js {
    use super::{AssetKind, EmbeddedAsset, TemplateVars};
    use crate::config::SiteConfig;

    /// Variables for site.js.
    pub struct SiteJsVars {
        pub activation_line: f64,
        pub smooth_scroll: bool,
    }

    impl SiteJsVars {
        /// Build client runtime variables from site config.
        pub fn from_config(config: &SiteConfig) -> Self {
            Self {
                activation_line: config.site.nav.activation_line,
                smooth_scroll: config.site.nav.smooth_scroll,
            }
        }
    }

    impl TemplateVars for SiteJsVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace(
                    "__FOLIO_ACTIVATION_LINE__",
                    &format!("{}", self.activation_line),
                )
                .replace(
                    "__FOLIO_SMOOTH_SCROLL__",
                    if self.smooth_scroll { "true" } else { "false" },
                )
        }

        fn hash_input(&self) -> String {
            format!("{}{}", self.activation_line, self.smooth_scroll)
        }
    }

    /// Client runtime with configuration injection.
    pub const SITE_JS: EmbeddedAsset<SiteJsVars> =
        EmbeddedAsset::new(AssetKind::JavaScript, "site", include_str!("js/site.js"));
}

pub mod serve {
    use super::{AssetKind, EmbeddedAsset, Template, TemplateVars};

    /// Variables for livereload.js.
    pub struct LivereloadVars {
        pub ws_port: u16,
    }

    impl TemplateVars for LivereloadVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__FOLIO_WS_PORT__", &self.ws_port.to_string())
        }

        fn hash_input(&self) -> String {
            self.ws_port.to_string()
        }
    }

    /// Variables for loading.html.
    pub struct LoadingVars<'a> {
        pub version: &'a str,
    }

    impl TemplateVars for LoadingVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__VERSION__", self.version)
        }
    }

    /// Loading page shown while the initial build runs.
    pub const LOADING_HTML: Template<LoadingVars<'static>> =
        Template::new(include_str!("serve/loading.html"));

    /// Live reload client with WebSocket port injection.
    pub const LIVERELOAD_JS: EmbeddedAsset<LivereloadVars> = EmbeddedAsset::new(
        AssetKind::JavaScript,
        "livereload",
        include_str!("serve/livereload.js"),
    );
}

pub mod init {
    use super::{Template, TemplateVars};

    /// Variables for the scaffold templates.
    pub struct ScaffoldVars<'a> {
        pub title: &'a str,
    }

    impl TemplateVars for ScaffoldVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__TITLE__", self.title)
        }
    }

    /// Starter folio.toml.
    pub const FOLIO_TOML: Template<ScaffoldVars<'static>> =
        Template::new(include_str!("init/folio.toml"));

    /// Starter content/profile.toml.
    pub const PROFILE_TOML: Template<ScaffoldVars<'static>> =
        Template::new(include_str!("init/profile.toml"));

    /// Starter content/about.md.
    pub const ABOUT_MD: Template<ScaffoldVars<'static>> =
        Template::new(include_str!("init/about.md"));
}

// =============================================================================
// Embedded Assets Writer
// =============================================================================

use crate::config::SiteConfig;
use anyhow::Result;
use std::path::Path;

/// Write all embedded assets to the output directory.
///
/// - site.css (always)
/// - site.js with config injection (always)
pub fn write_embedded_assets(config: &SiteConfig, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    {
        use css::SITE_CSS;
        SITE_CSS.cleanup_old(output_dir)?;
        SITE_CSS.write_with_vars(output_dir, &NoVars)?;
    }

    {
        use js::{SITE_JS, SiteJsVars};
        let vars = SiteJsVars::from_config(config);
        SITE_JS.cleanup_old(output_dir)?;
        SITE_JS.write_with_vars(output_dir, &vars)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_js_with_vars() {
        let vars = js::SiteJsVars {
            activation_line: 100.0,
            smooth_scroll: true,
        };
        let rendered = js::SITE_JS.render(&vars);
        assert!(rendered.contains("var ACTIVATION_LINE = 100;"));
        assert!(!rendered.contains("__FOLIO_ACTIVATION_LINE__"));
        assert!(!rendered.contains("__FOLIO_SMOOTH_SCROLL__"));

        let url = js::SITE_JS.url_path_with_vars(&vars);
        assert!(url.starts_with("/.folio/site-"));
        assert!(url.ends_with(".js"));
    }

    #[test]
    fn test_site_js_hash_varies_with_config() {
        let a = js::SITE_JS.url_path_with_vars(&js::SiteJsVars {
            activation_line: 100.0,
            smooth_scroll: true,
        });
        let b = js::SITE_JS.url_path_with_vars(&js::SiteJsVars {
            activation_line: 140.0,
            smooth_scroll: true,
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_livereload_js_with_vars() {
        let vars = serve::LivereloadVars { ws_port: 35729 };
        let rendered = serve::LIVERELOAD_JS.render(&vars);
        assert!(rendered.contains("35729"));
        assert!(!rendered.contains("__FOLIO_WS_PORT__"));
    }

    #[test]
    fn test_loading_page_version() {
        let html = serve::LOADING_HTML.render(&serve::LoadingVars { version: "0.3.0" });
        assert!(html.contains("0.3.0"));
        assert!(html.contains("X-Folio-Ready"));
    }

    #[test]
    fn test_scaffold_templates_inject_title() {
        let vars = init::ScaffoldVars { title: "Jane Doe" };
        assert!(init::FOLIO_TOML.render(&vars).contains("Jane Doe"));
        assert!(init::PROFILE_TOML.render(&vars).contains("Jane Doe"));
    }

    #[test]
    fn test_scaffold_config_parses() {
        let vars = init::ScaffoldVars { title: "Jane" };
        let rendered = init::FOLIO_TOML.render(&vars);
        let config = crate::config::SiteConfig::from_str(&rendered).unwrap();
        assert_eq!(config.site.info.title, "Jane");
        assert_eq!(config.site.sections.len(), 5);
    }

    #[test]
    fn test_write_embedded_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::config::SiteConfig::default();
        write_embedded_assets(&config, dir.path()).unwrap();

        let embed_dir = dir.path().join(EMBED_DIR);
        let entries: Vec<_> = std::fs::read_dir(&embed_dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(entries.iter().any(|n| n.starts_with("site-") && n.ends_with(".css")));
        assert!(entries.iter().any(|n| n.starts_with("site-") && n.ends_with(".js")));
    }
}
