//! Configuration section definitions.

pub mod build;
pub mod feeds;
pub mod serve;
pub mod site;

pub use build::{BuildSectionConfig, SitemapConfig};
pub use feeds::{FeedConfig, FeedsConfig};
pub use serve::ServeConfig;
pub use site::{NavConfig, SectionEntry, SiteInfoConfig, SiteSectionConfig};
