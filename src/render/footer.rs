//! Footer rendering.

use super::PageContext;
use crate::utils::html::{escape, escape_attr};

pub fn render_footer(ctx: &PageContext<'_>) -> String {
    let info = &ctx.config.site.info;
    let mut footer = String::from("<footer class=\"footer\">\n<div class=\"container footer-inner\">\n");

    let copyright = if info.copyright.is_empty() {
        let name = if info.author.is_empty() {
            &ctx.profile.hero.name
        } else {
            &info.author
        };
        format!("© {name}. All rights reserved.")
    } else {
        info.copyright.clone()
    };
    footer.push_str(&format!("<span>{}</span>\n", escape(&copyright)));

    if !ctx.profile.socials.is_empty() {
        footer.push_str("<span>");
        for social in &ctx.profile.socials {
            footer.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> ",
                escape_attr(&social.url),
                escape(&social.label),
            ));
        }
        footer.push_str("</span>\n");
    }

    if let Some(first) = ctx.registry.first_id() {
        footer.push_str(&format!(
            "<a href=\"#{id}\" data-section-link=\"{id}\">Back to top ↑</a>\n",
            id = escape_attr(first.as_str()),
        ));
    }

    footer.push_str("</div>\n</footer>\n");
    footer
}

#[cfg(test)]
mod tests {
    use crate::render::test_support::with_context;

    #[test]
    fn test_footer_derives_copyright() {
        let footer = with_context(super::render_footer);
        assert!(footer.contains("© MD Wahid. All rights reserved."));
    }

    #[test]
    fn test_footer_back_to_top_targets_first_section() {
        let footer = with_context(super::render_footer);
        assert!(footer.contains("data-section-link=\"home\""));
    }
}
