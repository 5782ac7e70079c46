//! Remote feed fetching.
//!
//! The blog listing and project showcase can be backed by remote endpoints
//! (an articles API and a projects API), each returning a JSON array of
//! records. Fetching is deliberately simple: one blocking GET per feed with
//! a timeout, with no caching and no retries. Both feeds fetch in
//! parallel, and any failure falls back to the local records from
//! `profile.toml` with a logged warning; a dead endpoint never fails a
//! build.
//!
//! Record decoding is tolerant: unknown fields are ignored, missing fields
//! default, and field aliases cover the common endpoint shapes (dev.to
//! articles, GitHub repos).

pub mod strip;

use anyhow::{Context, Result};
use arc_swap::ArcSwapOption;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::config::{FeedConfig, FeedsConfig};
use crate::content::{Post, Project, estimate_read_time};
use crate::log;
use strip::clean_description;

/// Resolved listing content: feed records when available, local otherwise.
#[derive(Debug, Clone)]
pub struct SiteRecords {
    pub posts: Vec<Post>,
    pub projects: Vec<Project>,
}

/// Records resolved by the last full build.
///
/// Watch-mode rebuilds re-render from this store instead of refetching:
/// a content edit should never wait on (or panic inside) a network call
/// made from the actor runtime.
static STORED_RECORDS: LazyLock<ArcSwapOption<SiteRecords>> =
    LazyLock::new(ArcSwapOption::empty);

/// Remember the records of the last full build.
pub fn store_records(records: SiteRecords) {
    STORED_RECORDS.store(Some(Arc::new(records)));
}

/// Records from the last full build, if any.
pub fn stored_records() -> Option<Arc<SiteRecords>> {
    STORED_RECORDS.load_full()
}

/// Fetch both feeds in parallel, falling back to the given local records.
pub fn fetch_records(
    feeds: &FeedsConfig,
    local_posts: Vec<Post>,
    local_projects: Vec<Project>,
) -> SiteRecords {
    if feeds.offline {
        return SiteRecords {
            posts: local_posts,
            projects: local_projects,
        };
    }

    let (posts, projects) = rayon::join(
        || fetch_or_fallback("articles", &feeds.articles, local_posts, fetch_articles),
        || fetch_or_fallback("projects", &feeds.projects, local_projects, fetch_projects),
    );

    SiteRecords { posts, projects }
}

/// Run one feed fetch, keeping the local records on any failure.
fn fetch_or_fallback<T>(
    name: &str,
    feed: &FeedConfig,
    local: Vec<T>,
    fetch: fn(&FeedConfig) -> Result<Vec<T>>,
) -> Vec<T> {
    if !feed.enable {
        return local;
    }

    match fetch(feed) {
        Ok(records) if records.is_empty() => {
            log!("fetch"; "{} feed returned no records, using local content", name);
            local
        }
        Ok(records) => {
            log!("fetch"; "{}: {} records", name, records.len());
            records
        }
        Err(e) => {
            log!("warning"; "{} feed failed ({e:#}), using local content", name);
            local
        }
    }
}

/// GET a feed URL and decode the JSON array body.
fn get_json<T: serde::de::DeserializeOwned>(feed: &FeedConfig) -> Result<Vec<T>> {
    let url = feed.url.as_deref().context("feed has no url")?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(feed.timeout))
        .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;

    response.json().context("failed to decode feed body")
}

// =============================================================================
// Articles feed
// =============================================================================

/// One record from the articles endpoint (dev.to-shaped, tolerantly).
#[derive(Debug, Deserialize)]
struct RemoteArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "published_at")]
    date: Option<String>,
    #[serde(default, alias = "reading_time_minutes")]
    reading_minutes: Option<u64>,
    #[serde(default, alias = "tag_list")]
    tags: Vec<String>,
}

fn fetch_articles(feed: &FeedConfig) -> Result<Vec<Post>> {
    let articles: Vec<RemoteArticle> = get_json(feed)?;

    let mut posts: Vec<Post> = articles
        .into_iter()
        .filter(|a| !a.title.is_empty() && !a.url.is_empty())
        .map(|a| {
            let description = clean_description(&a.description);
            let read_time = match a.reading_minutes {
                Some(m) => format!("{} min read", m.max(1)),
                None => estimate_read_time(&description),
            };
            Post {
                title: a.title,
                url: a.url,
                description,
                date: a.date.map(|d| normalize_date(&d)),
                read_time: Some(read_time),
                category: a.tags.into_iter().next().unwrap_or_default(),
                featured: false,
            }
        })
        .collect();

    // Newest first; the first two become the featured cards
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts.truncate(feed.limit);
    for post in posts.iter_mut().take(2) {
        post.featured = true;
    }

    Ok(posts)
}

/// Reduce endpoint timestamps to the `YYYY-MM-DD` the cards display.
fn normalize_date(raw: &str) -> String {
    match crate::utils::date::Date::parse(raw) {
        Some(date) => date.to_iso(),
        None => raw.to_string(),
    }
}

// =============================================================================
// Projects feed
// =============================================================================

/// One record from the projects endpoint (GitHub-repo-shaped, tolerantly).
#[derive(Debug, Deserialize)]
struct RemoteProject {
    #[serde(default, alias = "name")]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "html_url")]
    repo: Option<String>,
    #[serde(default, alias = "homepage")]
    demo: Option<String>,
    #[serde(default, alias = "topics")]
    tech: Vec<String>,
    #[serde(default)]
    fork: bool,
    #[serde(default, alias = "stargazers_count")]
    stars: u64,
}

fn fetch_projects(feed: &FeedConfig) -> Result<Vec<Project>> {
    let repos: Vec<RemoteProject> = get_json(feed)?;

    let mut ranked: Vec<(u64, Project)> = repos
        .into_iter()
        .filter(|r| !r.title.is_empty() && !r.fork)
        .map(|r| {
            (
                r.stars,
                Project {
                    title: r.title,
                    description: clean_description(r.description.as_deref().unwrap_or_default()),
                    tech: r.tech,
                    repo: r.repo,
                    demo: r.demo.filter(|d| !d.is_empty()),
                    featured: false,
                },
            )
        })
        .collect();

    // Most-starred first
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let mut projects: Vec<Project> = ranked.into_iter().map(|(_, p)| p).collect();
    projects.truncate(feed.limit);
    for project in projects.iter_mut().take(2) {
        project.featured = true;
    }

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_article_decode_devto_shape() {
        let json = r#"[{
            "title": "Building Scalable Apps",
            "url": "https://dev.to/me/building",
            "description": "Learn <b>best practices</b> &amp; patterns.",
            "published_at": "2024-01-15T08:00:00Z",
            "reading_time_minutes": 8,
            "tag_list": ["development", "react"],
            "unknown_field": 42
        }]"#;

        let articles: Vec<RemoteArticle> = serde_json::from_str(json).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].reading_minutes, Some(8));
        assert_eq!(articles[0].tags[0], "development");
    }

    #[test]
    fn test_remote_project_decode_github_shape() {
        let json = r#"[{
            "name": "ecommerce-platform",
            "description": "A modern <i>platform</i>",
            "html_url": "https://github.com/me/ecommerce-platform",
            "homepage": "",
            "topics": ["react", "stripe"],
            "fork": false,
            "stargazers_count": 12,
            "watchers": 3
        }]"#;

        let repos: Vec<RemoteProject> = serde_json::from_str(json).unwrap();
        assert_eq!(repos[0].title, "ecommerce-platform");
        assert_eq!(repos[0].tech, ["react", "stripe"]);
        assert!(!repos[0].fork);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-01-15T08:00:00Z"), "2024-01-15");
        assert_eq!(normalize_date("2024-01-15"), "2024-01-15");
        // Unparseable dates pass through rather than vanish
        assert_eq!(normalize_date("last tuesday"), "last tuesday");
    }

    #[test]
    fn test_disabled_feed_uses_local() {
        let feeds = FeedsConfig::default();
        let local = vec![Post {
            title: "Local".into(),
            ..Default::default()
        }];
        let records = fetch_records(&feeds, local, Vec::new());
        assert_eq!(records.posts.len(), 1);
        assert_eq!(records.posts[0].title, "Local");
    }

    #[test]
    fn test_offline_skips_enabled_feeds() {
        let mut feeds = FeedsConfig::default();
        feeds.articles.enable = true;
        feeds.articles.url = Some("https://example.invalid/api".into());
        feeds.offline = true;

        let records = fetch_records(&feeds, Vec::new(), Vec::new());
        assert!(records.posts.is_empty());
    }

    #[test]
    fn test_unreachable_feed_falls_back() {
        let mut feed = FeedConfig::default();
        feed.enable = true;
        feed.url = Some("http://127.0.0.1:1/api".into());
        feed.timeout = 1;

        let local = vec![Post {
            title: "Fallback".into(),
            ..Default::default()
        }];
        let posts = fetch_or_fallback("articles", &feed, local, fetch_articles);
        assert_eq!(posts[0].title, "Fallback");
    }
}
