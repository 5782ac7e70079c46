//! Navigation rendering: fixed top bar plus the mobile side menu.
//!
//! Both surfaces render the same links from the registry, each stamped
//! with `data-section-link="<id>"`; highlighting toggles the `active`
//! class on whichever link matches the tracker's current section. The
//! first section starts highlighted, matching the tracker's initial state.

use super::PageContext;
use crate::utils::html::{escape, escape_attr};

pub fn render_nav(ctx: &PageContext<'_>) -> String {
    let brand = ctx
        .config
        .site
        .nav
        .brand_or(if ctx.config.site.info.title.is_empty() {
            &ctx.profile.hero.name
        } else {
            &ctx.config.site.info.title
        })
        .to_string();

    let mut nav = String::with_capacity(2048);

    nav.push_str("<nav class=\"nav\">\n<div class=\"container nav-inner\">\n");
    nav.push_str(&format!(
        "<div class=\"nav-brand\">{}</div>\n",
        escape(&brand)
    ));

    // Desktop links
    nav.push_str("<div class=\"nav-links\">\n");
    nav.push_str(&render_links(ctx));
    nav.push_str(
        "<button class=\"icon-button\" data-theme-toggle aria-label=\"Toggle theme\">◐</button>\n",
    );
    nav.push_str("</div>\n");

    // Mobile menu button
    nav.push_str(
        "<button class=\"icon-button menu-button\" data-menu-open aria-label=\"Open menu\">☰</button>\n",
    );
    nav.push_str("</div>\n</nav>\n");

    // Mobile side menu + overlay
    nav.push_str("<div class=\"menu-overlay\"></div>\n");
    nav.push_str("<aside class=\"side-menu\">\n");
    nav.push_str(&format!(
        "<div class=\"nav-inner\"><div class=\"nav-brand\">{}</div>\
         <button class=\"icon-button\" data-menu-close aria-label=\"Close menu\">✕</button></div>\n",
        escape(&brand)
    ));
    nav.push_str(&render_links(ctx));
    nav.push_str("</aside>\n");

    nav
}

/// One `<a>` per registered section, in declared order.
fn render_links(ctx: &PageContext<'_>) -> String {
    let mut links = String::new();
    for (index, section) in ctx.registry.iter().enumerate() {
        let active = if index == 0 { " class=\"active\"" } else { "" };
        links.push_str(&format!(
            "<a href=\"#{id}\" data-section-link=\"{id}\"{active}>{label}</a>\n",
            id = escape_attr(section.id().as_str()),
            label = escape(section.label()),
        ));
    }
    links
}

#[cfg(test)]
mod tests {
    use crate::render::test_support::with_context;

    #[test]
    fn test_nav_links_in_registry_order() {
        let nav = with_context(super::render_nav);
        let home = nav.find("data-section-link=\"home\"").unwrap();
        let about = nav.find("data-section-link=\"about\"").unwrap();
        let contact = nav.find("data-section-link=\"contact\"").unwrap();
        assert!(home < about && about < contact);
    }

    #[test]
    fn test_first_link_starts_active() {
        let nav = with_context(super::render_nav);
        assert!(nav.contains("data-section-link=\"home\" class=\"active\""));
        assert!(!nav.contains("data-section-link=\"about\" class=\"active\""));
    }

    #[test]
    fn test_nav_has_both_surfaces() {
        let nav = with_context(super::render_nav);
        assert!(nav.contains("class=\"nav-links\""));
        assert!(nav.contains("class=\"side-menu\""));
        // Links render once per surface
        assert_eq!(nav.matches("data-section-link=\"blog\"").count(), 2);
    }

    #[test]
    fn test_nav_brand_falls_back_to_hero_name() {
        let nav = with_context(super::render_nav);
        assert!(nav.contains("MD Wahid"));
    }
}
