//! HTML generation for the single portfolio page.
//!
//! Pure string building with escape-everything discipline: every value
//! that originates in config, content, or a remote feed goes through
//! `utils::html::escape` / `escape_attr` on the way into markup.
//!
//! The section registry drives both the navigation and the page body, in
//! the same declared order. The scroll-spy tie-break assumes the visual
//! order of sections matches registry order, and rendering both from one
//! list keeps that true by construction.
//!
//! # Module Structure
//!
//! - `head` - `<head>`: meta, OpenGraph, stylesheet link
//! - `nav` - desktop nav + mobile side menu
//! - `sections` - hero, about, projects, blog, contact
//! - `footer` - footer with socials and copyright

mod footer;
mod head;
mod nav;
mod sections;

use crate::config::SiteConfig;
use crate::content::Profile;
use crate::fetch::SiteRecords;
use crate::scrollspy::SectionRegistry;

/// Everything the page renderer needs.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub profile: &'a Profile,
    pub records: &'a SiteRecords,
    pub registry: &'a SectionRegistry,
}

/// Render the complete index.html.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(32 * 1024);

    html.push_str("<!doctype html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\">\n",
        crate::utils::html::escape_attr(&ctx.config.site.info.language)
    ));
    html.push_str(&head::render_head(ctx));
    html.push_str("<body>\n");
    html.push_str(&nav::render_nav(ctx));
    html.push_str("<main>\n");

    for section in ctx.registry.iter() {
        html.push_str(&sections::render_section(ctx, section));
    }

    html.push_str("</main>\n");
    html.push_str(&footer::render_footer(ctx));

    // Client runtime, fingerprinted like the stylesheet
    let js_vars = crate::embed::js::SiteJsVars::from_config(ctx.config);
    html.push_str(&crate::embed::js::SITE_JS.external_tag_with_vars(&js_vars));
    html.push('\n');

    html.push_str("</body>\n</html>\n");
    html
}


#[cfg(test)]
mod tests {
    use super::test_support::with_context;
    use super::*;

    #[test]
    fn test_page_structure() {
        let html = with_context(render_page);

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<main>"));
        assert!(html.contains("</html>"));
        // One wrapper per registered section, in order
        let home = html.find("id=\"home\"").unwrap();
        let about = html.find("id=\"about\"").unwrap();
        let contact = html.find("id=\"contact\"").unwrap();
        assert!(home < about && about < contact);
    }

    #[test]
    fn test_page_links_fingerprinted_assets() {
        let html = with_context(render_page);
        assert!(html.contains("/.folio/site-"));
        assert!(html.contains(".css"));
        assert!(html.contains(".js"));
    }

    #[test]
    fn test_sections_carry_data_attributes() {
        let html = with_context(render_page);
        // The live client collects rects from [data-section]
        assert!(html.contains("<section id=\"home\" data-section=\"home\""));
        assert!(html.contains("<section id=\"blog\" data-section=\"blog\""));
    }
}
