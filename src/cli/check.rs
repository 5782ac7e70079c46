//! `folio check` - validate config and content without building.
//!
//! The config itself already validated during load (it refuses bad
//! section registries outright); this command additionally loads the
//! content and reports what a build would see.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural::plural_count;

pub fn check_site(config: &SiteConfig) -> Result<()> {
    let registry = config.section_registry()?;
    log!(
        "check";
        "{} in scroll-spy order: {}",
        plural_count(registry.len(), "section"),
        registry
            .iter()
            .map(|s| format!("#{}", s.id()))
            .collect::<Vec<_>>()
            .join(" → ")
    );

    let profile = crate::content::load(config)?;
    if profile.hero.name.is_empty() {
        log!("warning"; "hero.name is empty - the page headline will be blank");
    }
    if profile.about.body_html.is_empty() && profile.about.summary.is_empty() {
        log!("warning"; "no about content (about.md missing and about.summary empty)");
    }

    log!(
        "check";
        "content: {}, {}, {}, {}",
        plural_count(profile.skills.len(), "skill group"),
        plural_count(profile.experience.len(), "experience entry"),
        plural_count(profile.projects.len(), "local project"),
        plural_count(profile.posts.len(), "local post")
    );

    for feed in [
        ("articles", &config.feeds.articles),
        ("projects", &config.feeds.projects),
    ] {
        match (feed.1.enable, &feed.1.url) {
            (true, Some(url)) => log!("check"; "{} feed: {}", feed.0, url),
            _ => log!("check"; "{} feed: disabled (local records)", feed.0),
        }
    }

    log!("check"; "ok");
    Ok(())
}
