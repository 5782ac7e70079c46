//! Site content: the profile data model and its loaders.
//!
//! Content lives outside `folio.toml` so the site's words can change
//! without touching its configuration:
//!
//! - `content/profile.toml`: hero, skills, experience, contact info,
//!   social links, plus local fallback records for the two feeds.
//! - `content/about.md`: the long-form bio, rendered through markdown.
//!
//! # Module Structure
//!
//! - `profile` - the deserialized model
//! - `records` - article/project records shared with the feed fetcher

pub mod profile;
pub mod records;

pub use profile::{About, ContactInfo, Experience, Hero, Profile, SkillGroup, SocialLink};
pub use records::{Post, Project, estimate_read_time};

use anyhow::{Context, Result};
use std::fs;

use crate::config::SiteConfig;

/// Load the full profile from the content directory.
///
/// `profile.toml` is required; `about.md` is optional (the about section
/// then falls back to the short summary).
pub fn load(config: &SiteConfig) -> Result<Profile> {
    let profile_path = config.build.profile_path();
    let raw = fs::read_to_string(&profile_path)
        .with_context(|| format!("Failed to read {}", profile_path.display()))?;

    let mut profile: Profile = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", profile_path.display()))?;

    let about_path = config.build.about_path();
    if about_path.is_file() {
        let markdown = fs::read_to_string(&about_path)
            .with_context(|| format!("Failed to read {}", about_path.display()))?;
        profile.about.body_html = render_markdown(&markdown);
    }

    // Derive reading time for local posts that don't carry one
    for post in &mut profile.posts {
        if post.read_time.is_none() {
            post.read_time = Some(estimate_read_time(&post.description));
        }
    }

    Ok(profile)
}

/// Render markdown to HTML.
fn render_markdown(markdown: &str) -> String {
    use pulldown_cmark::{Options, Parser, html};

    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_basic() {
        let html = render_markdown("I build **solutions** that matter.");
        assert!(html.contains("<strong>solutions</strong>"));
    }

    #[test]
    fn test_render_markdown_paragraphs() {
        let html = render_markdown("First.\n\nSecond.");
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn test_load_profile_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("content");
        std::fs::create_dir_all(&content_dir).unwrap();
        std::fs::write(
            content_dir.join("profile.toml"),
            r#"
[hero]
name = "MD Wahid"
tagline = "Full-Stack Software Engineer"
lead = "I design seamless digital experiences."

[about]
summary = "Engineer from Dhaka."

[[skills]]
category = "Frontend"
technologies = ["React", "TypeScript"]

[[experience]]
period = "2024 - Present"
title = "Freelance Developer"
company = "Fiverr"
summary = "Web development services."

[contact]
email = "hello@example.com"
location = "Dhaka, Bangladesh"

[[socials]]
label = "GitHub"
url = "https://github.com/example"

[[posts]]
title = "A post"
url = "https://example.com/post"
description = "Ten words of description text to estimate reading time from."
date = "2024-01-15"

[[projects]]
title = "E-commerce Platform"
description = "A modern platform."
tech = ["React", "Stripe"]
featured = true
"#,
        )
        .unwrap();
        std::fs::write(content_dir.join("about.md"), "Hello **world**.").unwrap();

        let mut config = crate::config::SiteConfig::default();
        config.build.content = content_dir;

        let profile = load(&config).unwrap();
        assert_eq!(profile.hero.name, "MD Wahid");
        assert!(profile.about.body_html.contains("<strong>world</strong>"));
        assert_eq!(profile.skills.len(), 1);
        assert_eq!(profile.projects.len(), 1);
        assert!(profile.projects[0].featured);
        // Reading time derived for the local post
        assert!(profile.posts[0].read_time.is_some());
    }

    #[test]
    fn test_load_missing_profile_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = crate::config::SiteConfig::default();
        config.build.content = dir.path().join("content");
        assert!(load(&config).is_err());
    }
}
