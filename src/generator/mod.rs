//! Sitemap and robots.txt generation.
//!
//! The site is a single page, so the sitemap lists the page itself plus
//! one fragment URL per section anchor.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!   </url>
//! </urlset>
//! ```

use crate::{config::SiteConfig, log, scrollspy::SectionRegistry};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled.
pub fn build_sitemap(config: &SiteConfig, registry: &SectionRegistry) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::build(config, registry);
        sitemap.write(config)?;
    }
    Ok(())
}

/// Write robots.txt if enabled.
pub fn build_robots(config: &SiteConfig) -> Result<()> {
    if !config.build.robots {
        return Ok(());
    }

    let mut robots = String::from("User-agent: *\nAllow: /\n");
    if config.build.sitemap.enable
        && let Some(url) = &config.site.info.url
    {
        robots.push_str(&format!(
            "Sitemap: {}/{}\n",
            url.trim_end_matches('/'),
            config.build.sitemap.path.display()
        ));
    }

    let path = config.build.output.join("robots.txt");
    fs::write(&path, robots)
        .with_context(|| format!("Failed to write robots.txt to {}", path.display()))?;

    log!("robots"; "robots.txt");
    Ok(())
}

struct Sitemap {
    urls: Vec<String>,
}

impl Sitemap {
    fn build(config: &SiteConfig, registry: &SectionRegistry) -> Self {
        let base_url = config
            .site
            .info
            .url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/');

        let mut urls = vec![format!("{base_url}/")];
        for section in registry.iter() {
            urls.push(format!("{base_url}/#{}", section.id()));
        }

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for url in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&url));
            xml.push_str("</loc>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.build.output.join(&config.build.sitemap.path);
        let xml = self.into_xml();

        fs::write(&sitemap_path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
