//! Site building.
//!
//! A full build: load content → fetch feeds → render index.html → copy
//! assets → write embedded css/js → sitemap + robots. The watch-mode
//! rebuild is the same pipeline minus cleaning and the SEO artifacts.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use jwalk::WalkDir;

use crate::config::SiteConfig;
use crate::log;
use crate::render::PageContext;
use crate::utils::plural::plural_count;

/// Full production build.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let started = Instant::now();

    if config.build.clean && config.build.output.exists() {
        fs::remove_dir_all(&config.build.output)
            .with_context(|| format!("Failed to clean {}", config.build.output.display()))?;
    }
    fs::create_dir_all(&config.build.output)?;

    let profile = crate::content::load(config)?;
    let records = crate::fetch::fetch_records(
        &config.feeds,
        profile.posts.clone(),
        profile.projects.clone(),
    );

    render_page_to_disk(config, &profile, &records)?;

    // Watch-mode rebuilds reuse these instead of refetching
    crate::fetch::store_records(records);

    let copied = copy_assets(config)?;
    crate::embed::write_embedded_assets(config, &config.build.output)?;

    // SEO artifacts generate in parallel
    let registry = config.section_registry()?;
    let (sitemap_result, robots_result) = rayon::join(
        || crate::generator::build_sitemap(config, &registry),
        || crate::generator::build_robots(config),
    );
    sitemap_result?;
    robots_result?;

    log!(
        "build";
        "done in {:.1?} ({}, {})",
        started.elapsed(),
        "index.html",
        plural_count(copied, "asset")
    );
    Ok(())
}

/// Watch-mode rebuild: re-render the page and refresh embedded assets.
///
/// No network: records come from the last full build's store (or the
/// local fallback records when nothing was fetched yet). Assets copy
/// separately on AssetChange, and serve mode disables the SEO artifacts.
pub fn rebuild_site(config: &SiteConfig) -> Result<()> {
    let profile = crate::content::load(config)?;

    let records = match crate::fetch::stored_records() {
        Some(stored) => (*stored).clone(),
        None => crate::fetch::SiteRecords {
            posts: profile.posts.clone(),
            projects: profile.projects.clone(),
        },
    };

    render_page_to_disk(config, &profile, &records)?;
    crate::embed::write_embedded_assets(config, &config.build.output)?;
    Ok(())
}

/// Render and write index.html.
fn render_page_to_disk(
    config: &SiteConfig,
    profile: &crate::content::Profile,
    records: &crate::fetch::SiteRecords,
) -> Result<()> {
    let registry = config.section_registry()?;
    let html = crate::render::render_page(&PageContext {
        config,
        profile,
        records,
        registry: &registry,
    });

    let index_path = config.build.output.join("index.html");
    fs::create_dir_all(&config.build.output)?;
    fs::write(&index_path, html)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    Ok(())
}

/// Copy the assets directory into the output, preserving structure.
///
/// Returns the number of files copied. A missing assets directory is not
/// an error; the site just has no static assets.
pub fn copy_assets(config: &SiteConfig) -> Result<usize> {
    let source = &config.build.assets;
    if !source.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).skip_hidden(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(source)
            .expect("walked path is under the assets root");
        let target = config.build.output.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&path, &target)
            .with_context(|| format!("Failed to copy {}", path.display()))?;
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_config(root: &std::path::Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.content = root.join("content");
        config.build.assets = root.join("assets");
        config.build.output = root.join("dist");
        config
    }

    fn write_minimal_content(root: &std::path::Path) {
        let content = root.join("content");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::write(
            content.join("profile.toml"),
            "[hero]\nname = \"Test\"\ntagline = \"Engineer\"\n",
        )
        .unwrap();
    }

    #[test]
    fn test_copy_assets_missing_dir_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let config = site_config(dir.path());
        assert_eq!(copy_assets(&config).unwrap(), 0);
    }

    #[test]
    fn test_copy_assets_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let config = site_config(dir.path());

        let nested = config.build.assets.join("img");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("portrait.png"), b"png").unwrap();
        std::fs::write(config.build.assets.join("cv.pdf"), b"pdf").unwrap();

        let copied = copy_assets(&config).unwrap();
        assert_eq!(copied, 2);
        assert!(config.build.output.join("img/portrait.png").is_file());
        assert!(config.build.output.join("cv.pdf").is_file());
    }

    #[test]
    fn test_rebuild_site_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = site_config(dir.path());
        write_minimal_content(dir.path());

        rebuild_site(&config).unwrap();

        let index = config.build.output.join("index.html");
        let html = std::fs::read_to_string(index).unwrap();
        assert!(html.contains("Test"));
        assert!(html.contains("data-section=\"home\""));
        // Embedded assets landed next to the page
        assert!(config.build.output.join(".folio").is_dir());
    }

    #[test]
    fn test_build_site_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site_config(dir.path());
        config.site.info.url = Some("https://example.com".into());
        write_minimal_content(dir.path());

        build_site(&config).unwrap();

        assert!(config.build.output.join("index.html").is_file());
        assert!(config.build.output.join("sitemap.xml").is_file());
        assert!(config.build.output.join("robots.txt").is_file());
    }

    #[test]
    fn test_build_clean_removes_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site_config(dir.path());
        config.build.sitemap.enable = false;
        config.build.robots = false;
        config.build.clean = true;
        write_minimal_content(dir.path());

        let stale = config.build.output.join("stale.html");
        std::fs::create_dir_all(&config.build.output).unwrap();
        std::fs::write(&stale, "old").unwrap();

        build_site(&config).unwrap();
        assert!(!stale.exists());
        assert!(config.build.output.join("index.html").is_file());
    }

    #[test]
    fn test_missing_profile_fails_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = site_config(dir.path());
        assert!(build_site(&config).is_err());
    }
}
