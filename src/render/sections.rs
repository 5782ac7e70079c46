//! Section body rendering.
//!
//! Each registered section id maps to a renderer; an id without a
//! dedicated renderer still gets an anchored wrapper so custom sections
//! scroll and highlight correctly, they just have no generated body.

use super::PageContext;
use crate::content::{Post, Project};
use crate::scrollspy::Section;
use crate::utils::date::Date;
use crate::utils::html::{escape, escape_attr};

/// Render one registered section.
pub fn render_section(ctx: &PageContext<'_>, section: &Section) -> String {
    let body = match section.id().as_str() {
        "home" => render_hero(ctx),
        "about" => render_about(ctx),
        "projects" => render_projects(ctx),
        "blog" => render_blog(ctx),
        "contact" => render_contact(ctx),
        _ => String::new(),
    };

    format!(
        "<section id=\"{id}\" data-section=\"{id}\">\n<div class=\"container\">\n{body}</div>\n</section>\n",
        id = escape_attr(section.id().as_str()),
    )
}

// =============================================================================
// Hero
// =============================================================================

fn render_hero(ctx: &PageContext<'_>) -> String {
    let hero = &ctx.profile.hero;
    let mut html = String::new();

    html.push_str(&format!(
        "<h1 class=\"hero-name\">{}</h1>\n",
        escape(&hero.name)
    ));
    if !hero.tagline.is_empty() {
        html.push_str(&format!(
            "<p class=\"hero-tagline\">{}</p>\n",
            escape(&hero.tagline)
        ));
    }
    if !hero.lead.is_empty() {
        html.push_str(&format!(
            "<p class=\"hero-lead\">{}</p>\n",
            escape(&hero.lead)
        ));
    }

    // CTA buttons target registered sections only
    let mut buttons = String::new();
    if ctx.registry.contains(&"projects".into()) {
        buttons.push_str(
            "<a class=\"button primary\" href=\"#projects\" data-section-link=\"projects\">View My Work</a>\n",
        );
    }
    if ctx.registry.contains(&"contact".into()) {
        buttons.push_str(
            "<a class=\"button ghost\" href=\"#contact\" data-section-link=\"contact\">Get In Touch</a>\n",
        );
    }
    if !buttons.is_empty() {
        html.push_str(&format!("<p class=\"hero-actions\">{buttons}</p>\n"));
    }

    html.push_str(&render_social_row(ctx));
    html
}

fn render_social_row(ctx: &PageContext<'_>) -> String {
    if ctx.profile.socials.is_empty() {
        return String::new();
    }
    let mut html = String::from("<p class=\"hero-socials\">");
    for social in &ctx.profile.socials {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> ",
            escape_attr(&social.url),
            escape(&social.label),
        ));
    }
    html.push_str("</p>\n");
    html
}

// =============================================================================
// About
// =============================================================================

fn render_about(ctx: &PageContext<'_>) -> String {
    let mut html = String::new();
    html.push_str("<h2 class=\"section-title\">About Me</h2>\n");

    if let Some(portrait) = &ctx.profile.about.portrait {
        html.push_str(&format!(
            "<img class=\"portrait\" src=\"{}\" alt=\"{}\">\n",
            escape_attr(portrait),
            escape_attr(&ctx.profile.hero.name),
        ));
    }

    // about.md output is trusted markup; everything else is escaped
    html.push_str(&format!(
        "<div class=\"about-body\">{}</div>\n",
        ctx.profile.about.html_or_summary()
    ));

    if !ctx.profile.skills.is_empty() {
        html.push_str("<h3>Skills</h3>\n<div class=\"card-grid\">\n");
        for group in &ctx.profile.skills {
            html.push_str(&format!(
                "<div class=\"card\">\n<h3>{}</h3>\n<div>",
                escape(&group.category)
            ));
            for tech in &group.technologies {
                html.push_str(&format!("<span class=\"badge\">{}</span>", escape(tech)));
            }
            html.push_str("</div>\n</div>\n");
        }
        html.push_str("</div>\n");
    }

    if !ctx.profile.experience.is_empty() {
        html.push_str("<h3>Experience</h3>\n<div class=\"timeline\">\n");
        for entry in &ctx.profile.experience {
            html.push_str(&format!(
                "<div class=\"timeline-entry\">\n<div class=\"period\">{}</div>\n\
                 <h4>{} · {}</h4>\n<p>{}</p>\n</div>\n",
                escape(&entry.period),
                escape(&entry.title),
                escape(&entry.company),
                escape(&entry.summary),
            ));
        }
        html.push_str("</div>\n");
    }

    html
}

// =============================================================================
// Projects
// =============================================================================

fn render_projects(ctx: &PageContext<'_>) -> String {
    let projects = &ctx.records.projects;
    let mut html = String::new();

    html.push_str("<h2 class=\"section-title\">Featured Projects</h2>\n");
    html.push_str(
        "<p class=\"section-intro\">A selection of work across the stack.</p>\n",
    );

    let (featured, rest): (Vec<_>, Vec<_>) = projects.iter().partition(|p| p.featured);

    if !featured.is_empty() {
        html.push_str("<h3>Featured Work</h3>\n<div class=\"card-grid\">\n");
        for project in &featured {
            html.push_str(&render_project_card(project));
        }
        html.push_str("</div>\n");
    }

    if !rest.is_empty() {
        html.push_str("<h3>Other Projects</h3>\n<div class=\"card-grid\">\n");
        for project in &rest {
            html.push_str(&render_project_card(project));
        }
        html.push_str("</div>\n");
    }

    html
}

fn render_project_card(project: &Project) -> String {
    let mut card = String::from("<article class=\"card\">\n");
    card.push_str(&format!("<h3>{}</h3>\n", escape(&project.title)));
    if !project.description.is_empty() {
        card.push_str(&format!("<p>{}</p>\n", escape(&project.description)));
    }

    if !project.tech.is_empty() {
        card.push_str("<div>");
        for tech in &project.tech {
            card.push_str(&format!("<span class=\"badge\">{}</span>", escape(tech)));
        }
        card.push_str("</div>\n");
    }

    let mut links = String::new();
    if let Some(repo) = &project.repo {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Code</a> ",
            escape_attr(repo)
        ));
    }
    if let Some(demo) = &project.demo {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Demo</a>",
            escape_attr(demo)
        ));
    }
    if !links.is_empty() {
        card.push_str(&format!("<p class=\"meta\">{links}</p>\n"));
    }

    card.push_str("</article>\n");
    card
}

// =============================================================================
// Blog
// =============================================================================

fn render_blog(ctx: &PageContext<'_>) -> String {
    let posts = &ctx.records.posts;
    let mut html = String::new();

    html.push_str("<h2 class=\"section-title\">Latest Blog Posts</h2>\n");
    html.push_str(
        "<p class=\"section-intro\">Writing about software, design, and everything between.</p>\n",
    );

    if posts.is_empty() {
        html.push_str("<p class=\"section-intro\">No posts yet.</p>\n");
        return html;
    }

    html.push_str("<div class=\"card-grid\">\n");
    for post in posts {
        html.push_str(&render_post_card(post));
    }
    html.push_str("</div>\n");
    html
}

fn render_post_card(post: &Post) -> String {
    let mut card = String::from("<article class=\"card\">\n");

    let mut meta = Vec::new();
    if let Some(date) = post.date.as_deref().and_then(Date::parse) {
        meta.push(date.human());
    }
    if let Some(read_time) = &post.read_time {
        meta.push(read_time.clone());
    }
    if !post.category.is_empty() {
        card.push_str(&format!(
            "<span class=\"badge\">{}</span>\n",
            escape(&post.category)
        ));
    }

    card.push_str(&format!(
        "<h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h3>\n",
        escape_attr(&post.url),
        escape(&post.title),
    ));
    if !meta.is_empty() {
        card.push_str(&format!(
            "<p class=\"meta\">{}</p>\n",
            escape(&meta.join(" · "))
        ));
    }
    if !post.description.is_empty() {
        card.push_str(&format!("<p>{}</p>\n", escape(&post.description)));
    }

    card.push_str("</article>\n");
    card
}

// =============================================================================
// Contact
// =============================================================================

fn render_contact(ctx: &PageContext<'_>) -> String {
    let contact = &ctx.profile.contact;
    let mut html = String::new();

    html.push_str("<h2 class=\"section-title\">Get In Touch</h2>\n");
    html.push_str("<div class=\"contact-grid\">\n<div>\n");

    if !contact.email.is_empty() {
        html.push_str(&format!(
            "<p>Email: <a href=\"mailto:{0}\">{0}</a></p>\n",
            escape(&contact.email)
        ));
    }
    if !contact.phone.is_empty() {
        html.push_str(&format!("<p>Phone: {}</p>\n", escape(&contact.phone)));
    }
    if !contact.location.is_empty() {
        html.push_str(&format!("<p>Location: {}</p>\n", escape(&contact.location)));
    }
    html.push_str(&render_social_row(ctx));
    html.push_str("</div>\n");

    // Submissions go to the dev server's /api/contact endpoint
    html.push_str(
        "<form data-contact>\n\
         <input name=\"name\" placeholder=\"Your name\" required>\n\
         <input name=\"email\" type=\"email\" placeholder=\"Your email\" required>\n\
         <input name=\"subject\" placeholder=\"Subject\" required>\n\
         <textarea name=\"message\" placeholder=\"Message\" required></textarea>\n\
         <button class=\"button primary\" type=\"submit\">Send Message</button>\n\
         <p class=\"form-note\"></p>\n\
         </form>\n",
    );

    html.push_str("</div>\n");
    html
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::with_context;
    use crate::scrollspy::Section;

    #[test]
    fn test_unknown_section_gets_anchored_wrapper() {
        let html = with_context(|ctx| render_section(ctx, &Section::new("talks", "Talks")));
        assert!(html.contains("<section id=\"talks\" data-section=\"talks\">"));
    }

    #[test]
    fn test_hero_escapes_content() {
        let html = with_context(|ctx| {
            let mut profile = ctx.profile.clone();
            profile.hero.tagline = "Engineer <& tinkerer>".into();
            let ctx = super::super::PageContext {
                profile: &profile,
                ..*ctx
            };
            render_hero(&ctx)
        });
        assert!(html.contains("Engineer &lt;&amp; tinkerer&gt;"));
    }

    #[test]
    fn test_project_partition_featured_first() {
        let html = with_context(render_projects);
        assert!(html.contains("Featured Work"));
        // Single featured project, no "Other Projects" heading
        assert!(!html.contains("Other Projects"));
        assert!(html.contains("E-commerce Platform"));
    }

    #[test]
    fn test_post_card_meta() {
        let html = with_context(render_blog);
        assert!(html.contains("Jan 15, 2024"));
        assert!(html.contains("8 min read"));
        assert!(html.contains("Development"));
    }

    #[test]
    fn test_blog_empty_state() {
        let html = with_context(|ctx| {
            let records = crate::fetch::SiteRecords {
                posts: Vec::new(),
                projects: Vec::new(),
            };
            let ctx = super::super::PageContext {
                records: &records,
                ..*ctx
            };
            render_blog(&ctx)
        });
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_contact_form_fields() {
        let html = with_context(render_contact);
        for field in ["name", "email", "subject", "message"] {
            assert!(html.contains(&format!("name=\"{field}\"")));
        }
        assert!(html.contains("mailto:hello@example.com"));
    }

    #[test]
    fn test_hero_ctas_follow_registry() {
        // Registry without a contact section drops the second CTA
        let html = with_context(|ctx| {
            let registry = crate::scrollspy::SectionRegistry::new(vec![
                Section::new("home", "Home"),
                Section::new("projects", "Projects"),
            ])
            .unwrap();
            let ctx = super::super::PageContext {
                registry: &registry,
                ..*ctx
            };
            render_hero(&ctx)
        });
        assert!(html.contains("View My Work"));
        assert!(!html.contains("Get In Touch"));
    }
}
