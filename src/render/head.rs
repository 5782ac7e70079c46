//! `<head>` rendering: meta, OpenGraph, stylesheet.

use super::PageContext;
use crate::embed::{NoVars, css::SITE_CSS};
use crate::utils::html::{escape, escape_attr};

pub fn render_head(ctx: &PageContext<'_>) -> String {
    let info = &ctx.config.site.info;
    let title = if info.title.is_empty() {
        ctx.profile.hero.name.clone()
    } else {
        info.title.clone()
    };

    let mut head = String::with_capacity(1024);
    head.push_str("<head>\n");
    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    head.push_str(&format!("<title>{}</title>\n", escape(&title)));

    if !info.description.is_empty() {
        head.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape_attr(&info.description)
        ));
    }
    if !info.author.is_empty() {
        head.push_str(&format!(
            "<meta name=\"author\" content=\"{}\">\n",
            escape_attr(&info.author)
        ));
    }

    // OpenGraph
    head.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n",
        escape_attr(&title)
    ));
    head.push_str("<meta property=\"og:type\" content=\"website\">\n");
    if let Some(url) = &info.url {
        head.push_str(&format!(
            "<meta property=\"og:url\" content=\"{}\">\n",
            escape_attr(url)
        ));
    }
    if !info.description.is_empty() {
        head.push_str(&format!(
            "<meta property=\"og:description\" content=\"{}\">\n",
            escape_attr(&info.description)
        ));
    }

    head.push_str(&SITE_CSS.external_tag_with_vars(&NoVars));
    head.push('\n');
    head.push_str("</head>\n");
    head
}

#[cfg(test)]
mod tests {
    use crate::render::test_support::with_context;

    #[test]
    fn test_head_has_meta_and_stylesheet() {
        let head = with_context(super::render_head);
        assert!(head.contains("<meta charset=\"utf-8\">"));
        assert!(head.contains("og:title"));
        assert!(head.contains("stylesheet"));
    }

    #[test]
    fn test_head_title_falls_back_to_hero_name() {
        // Default config has an empty title; the hero name fills in
        let head = with_context(super::render_head);
        assert!(head.contains("<title>MD Wahid</title>"));
    }
}
