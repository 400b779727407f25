//! Homepage sections.

use super::chat::chat_widget;
use super::html::{NavLink, escape, markdown_view};
use crate::carousel::{self, CarouselCard, CarouselTuning};
use crate::chat::ChatMessage;
use crate::cms::{
    ContactLink, Experience, HomepageData, PLACEHOLDER_IMAGE, Project, SkillCategory,
};
use crate::markdown::{LoadedMarkdown, MarkdownContent};

fn section(id: &str, title: &str, body: &str) -> String {
    format!(
        r#"<section id="{id}" class="py-16 px-4">
    <h2 class="text-3xl font-bold text-center mb-8">{}</h2>
    {body}
</section>"#,
        escape(title)
    )
}

/// Header navigation pointing at each section that has a title.
#[must_use]
pub fn nav_links(data: &HomepageData) -> Vec<NavLink> {
    let s = &data.sections;
    [
        (&s.skills_section_title, "#skills"),
        (&s.timeline_section_title, "#timeline"),
        (&s.portfolio_section_title, "#portfolio"),
        (&s.chat_section_title, "#chat"),
        (&s.contact_section_title, "#contact"),
    ]
    .into_iter()
    .filter(|(label, _)| !label.trim().is_empty())
    .map(|(label, href)| NavLink {
        label: label.clone(),
        href: href.to_string(),
    })
    .collect()
}

#[must_use]
pub fn hero(title: &str, description: &str) -> String {
    format!(
        r#"<section id="hero" class="hero flex flex-col items-center justify-center text-center" style="min-height: calc(100vh - 4rem)">
    <h1 class="animated-title text-5xl font-bold">{}</h1>
    <p class="mt-6 text-xl max-w-2xl">{}</p>
</section>"#,
        escape(title),
        escape(description)
    )
}

#[must_use]
pub fn text_section(title: &str, text: &str) -> String {
    section("about", title, &markdown_view(text, "max-w-3xl mx-auto"))
}

#[must_use]
pub fn chat_section(title: &str, messages: &[ChatMessage]) -> String {
    section("chat", title, &chat_widget(messages))
}

fn carousel_card(card: &CarouselCard) -> String {
    let description = card
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="text-sm mx-5 my-3 overflow-auto">{}</p>"#, escape(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="shrink-0 select-none h-64"><div class="carousel-card h-full w-64 flex flex-col items-center text-center rounded-xl shadow-lg"><h3 class="font-semibold text-xl m-4">{}</h3>{description}</div></div>"#,
        escape(&card.name)
    )
}

/// A carousel strip; the `<auto-carousel>` component drives the motion.
#[must_use]
pub fn carousel(cards: &[CarouselCard], tuning: &CarouselTuning) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let strip: String = carousel::repeated(cards).iter().map(carousel_card).collect();
    format!(
        r#"<auto-carousel class="flex max-w-4xl mx-auto gap-6 py-5 overflow-x-hidden" style="touch-action: pan-y; cursor: grab" data-cards="{count}" data-auto-speed="{auto}" data-friction="{friction}" data-mouse-gain="{mouse}" data-touch-gain="{touch}" data-vertical-threshold="{vertical}">{strip}</auto-carousel>"#,
        count = cards.len(),
        auto = tuning.auto_speed,
        friction = tuning.friction,
        mouse = tuning.mouse_gain,
        touch = tuning.touch_gain,
        vertical = tuning.vertical_threshold,
    )
}

#[must_use]
pub fn skills_section(title: &str, categories: &[SkillCategory], tuning: &CarouselTuning) -> String {
    let body: String = categories
        .iter()
        .map(|category| {
            format!(
                r#"<div class="skill-category mb-10"><h3 class="text-2xl font-semibold text-center mb-4">{}</h3>{}</div>"#,
                escape(&category.title),
                carousel(&category.cards(), tuning)
            )
        })
        .collect();
    section("skills", title, &body)
}

fn timeline_entry(experience: &Experience) -> String {
    let side = if experience.kind.is_education() {
        "left"
    } else {
        "right"
    };
    let tag = experience
        .tag
        .as_deref()
        .map(|t| format!(r#"<span class="badge badge-tag">{}</span>"#, escape(t)))
        .unwrap_or_default();
    let subtags: String = experience
        .subtags
        .iter()
        .map(|t| format!(r#"<span class="badge">{}</span>"#, escape(t)))
        .collect();
    format!(
        r#"<li class="timeline-entry timeline-{side}" data-type="{kind:?}">
    <span class="timeline-date">{date}</span>
    <h3 class="text-xl font-semibold">{title}</h3>
    <h4 class="text-sm">{subtitle}</h4>
    <div class="flex flex-wrap gap-2 my-2">{tag}{subtags}</div>
    {text}
</li>"#,
        kind = experience.kind,
        date = escape(&experience.date),
        title = escape(&experience.title),
        subtitle = escape(&experience.subtitle),
        text = markdown_view(&experience.text, "text-sm"),
    )
}

#[must_use]
pub fn timeline_section(title: &str, experiences: &[Experience]) -> String {
    let entries: String = experiences.iter().map(timeline_entry).collect();
    section(
        "timeline",
        title,
        &format!(r#"<ol class="timeline max-w-4xl mx-auto">{entries}</ol>"#),
    )
}

fn portfolio_card(index: usize, project: &Project) -> String {
    let tags: String = project
        .tags
        .iter()
        .map(|t| format!(r#"<span class="badge">{}</span>"#, escape(t)))
        .collect();
    format!(
        r##"<article class="portfolio-card {grid} rounded-xl overflow-hidden shadow-xl p-1 cursor-pointer"
         hx-get="/projects/{index}/details" hx-target="#project-modal" hx-swap="innerHTML">
    <img src="{image}" alt="{alt}" loading="lazy" onerror="this.src='{placeholder}'" class="w-full object-cover">
    <div class="p-4">
        <h3 class="text-lg font-semibold">{title}</h3>
        <p class="text-sm">{description}</p>
        <div class="flex flex-wrap gap-2 mt-2">{tags}</div>
    </div>
</article>"##,
        grid = project.size.grid_class(),
        placeholder = PLACEHOLDER_IMAGE,
        image = escape(&project.image_url),
        alt = escape(&project.title),
        title = escape(&project.title),
        description = escape(&project.description),
    )
}

#[must_use]
pub fn portfolio_section(title: &str, projects: &[Project]) -> String {
    let cards: String = projects
        .iter()
        .enumerate()
        .map(|(i, p)| portfolio_card(i, p))
        .collect();
    section(
        "portfolio",
        title,
        &format!(
            r#"<div class="grid grid-cols-1 md:grid-cols-4 auto-rows-[16rem] gap-6 max-w-5xl mx-auto">{cards}</div>"#
        ),
    )
}

/// Modal body for a project, with its loaded markdown.
#[must_use]
pub fn project_modal(project: &Project, details: &LoadedMarkdown) -> String {
    let body = match &details.content {
        MarkdownContent::Markdown(md) => markdown_view(md, ""),
        MarkdownContent::Notice(notice) => format!("<p>{}</p>", escape(notice)),
    };
    format!(
        r#"<div class="modal-backdrop fixed inset-0 flex items-center justify-center" onclick="if (event.target === this) this.remove()">
    <div class="modal rounded-2xl p-8 max-w-3xl max-h-[85vh] overflow-y-auto" role="dialog" aria-modal="true">
        <button type="button" class="modal-close" aria-label="Close" onclick="this.closest('.modal-backdrop').remove()">&times;</button>
        <img src="{image}" alt="{title}" class="w-full rounded-xl mb-6">
        <h2 class="text-2xl font-bold mb-4">{title}</h2>
        {body}
    </div>
</div>"#,
        image = escape(&project.image_url),
        title = escape(&project.title),
    )
}

fn contact_link(link: &ContactLink) -> String {
    let download = if link.download { " download" } else { "" };
    let icon = if link.image_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" class="h-6 w-6">"#,
            escape(&link.image_url),
            escape(&link.social_media)
        )
    };
    format!(
        r#"<a href="{href}" target="_blank" rel="noopener noreferrer"{download} class="contact-link flex items-center gap-3 px-4 py-3 rounded-xl" data-social="{social}">{icon}<span>{text}</span></a>"#,
        href = escape(&link.link),
        social = escape(&link.social_media),
        text = escape(&link.text),
    )
}

/// Contact form; submission result is swapped into `#contact-status`.
#[must_use]
pub fn contact_form() -> String {
    r##"<form class="contact-form px-7 w-full max-w-3xl mx-auto mt-12 space-y-4"
      hx-post="/contact" hx-target="#contact-status" hx-swap="innerHTML">
    <div class="flex flex-col sm:flex-row gap-4">
        <input type="text" name="firstName" placeholder="First name" required class="flex-1 w-full bg-transparent border-b py-2">
        <input type="text" name="lastName" placeholder="Last name" required class="flex-1 w-full bg-transparent border-b py-2">
    </div>
    <input type="email" name="email" placeholder="Email" required class="w-full bg-transparent border-b py-2">
    <textarea name="message" placeholder="Message" rows="5" required class="w-full bg-transparent border p-3 rounded-md"></textarea>
    <button type="submit" class="w-full py-2 px-4 rounded-md">Send</button>
    <div id="contact-status" role="status"></div>
</form>"##
        .to_string()
}

/// Outcome line shown under the contact form.
#[must_use]
pub fn contact_status(ok: bool, message: &str) -> String {
    let class = if ok { "text-success" } else { "text-error" };
    format!(r#"<p class="{class}">{}</p>"#, escape(message))
}

#[must_use]
pub fn contact_section(title: &str, links: &[ContactLink]) -> String {
    let links: String = links.iter().map(contact_link).collect();
    section(
        "contact",
        title,
        &format!(
            r#"<div class="flex flex-wrap justify-center gap-4">{links}</div>{}"#,
            contact_form()
        ),
    )
}

/// Everything inside `<main>` for the homepage.
#[must_use]
pub fn homepage_body(data: &HomepageData, messages: &[ChatMessage], tuning: &CarouselTuning) -> String {
    let s = &data.sections;
    [
        hero(&s.hero_section_title, &s.hero_section_description),
        text_section(&s.text_section_title, &s.text_section_text),
        chat_section(&s.chat_section_title, messages),
        skills_section(&s.skills_section_title, &data.skill_categories, tuning),
        timeline_section(&s.timeline_section_title, &data.experiences),
        portfolio_section(&s.portfolio_section_title, &data.projects),
        contact_section(&s.contact_section_title, &data.contact_links),
    ]
    .concat()
}
