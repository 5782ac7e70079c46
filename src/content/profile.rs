//! The profile data model (`content/profile.toml`).
//!
//! Every field defaults so a half-written profile still builds; empty
//! sections simply render empty.

use serde::{Deserialize, Serialize};

use super::records::{Post, Project};

/// Root of `profile.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub hero: Hero,
    pub about: About,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<Experience>,
    pub contact: ContactInfo,
    pub socials: Vec<SocialLink>,

    /// Local projects, also the fallback when the projects feed is off.
    pub projects: Vec<Project>,

    /// Local posts, also the fallback when the articles feed is off.
    pub posts: Vec<Post>,
}

/// Hero banner content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    /// Display name, the page's headline.
    pub name: String,
    /// One-line role description under the name.
    pub tagline: String,
    /// Lead paragraph.
    pub lead: String,
}

/// About section content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    /// Short summary, used when `about.md` is absent.
    pub summary: String,

    /// Portrait image path, relative to the assets directory.
    pub portrait: Option<String>,

    /// Rendered `about.md` (filled by the loader, not the TOML).
    #[serde(skip)]
    pub body_html: String,
}

impl About {
    /// The HTML body to render: `about.md` when present, else the
    /// paragraph-wrapped summary.
    pub fn html_or_summary(&self) -> String {
        if self.body_html.is_empty() {
            format!("<p>{}</p>", crate::utils::html::escape(&self.summary))
        } else {
            self.body_html.clone()
        }
    }
}

/// One skill card: a category plus its technologies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub category: String,
    pub technologies: Vec<String>,
}

/// One experience timeline entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    /// Human-readable period (e.g. "2024 - Present").
    pub period: String,
    pub title: String,
    pub company: String,
    pub summary: String,
}

/// Contact details shown in the contact section and footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// One social link (GitHub, LinkedIn, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: Profile = toml::from_str("[hero]\nname = \"Jo\"\n").unwrap();
        assert_eq!(profile.hero.name, "Jo");
        assert!(profile.skills.is_empty());
        assert!(profile.posts.is_empty());
    }

    #[test]
    fn test_about_falls_back_to_summary() {
        let about = About {
            summary: "I build <things>.".into(),
            ..Default::default()
        };
        let html = about.html_or_summary();
        assert_eq!(html, "<p>I build &lt;things&gt;.</p>");
    }

    #[test]
    fn test_about_prefers_body_html() {
        let about = About {
            summary: "short".into(),
            body_html: "<p>long form</p>".into(),
            portrait: None,
        };
        assert_eq!(about.html_or_summary(), "<p>long form</p>");
    }
}
