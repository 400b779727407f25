//! Server-rendered pages and HTMX fragments.
//!
//! Pages are plain HTML strings. Interactivity comes from HTMX attributes
//! and two web components (`<auto-carousel>`, `<burger-menu>`) shipped as
//! static assets. Markdown is rendered on the server.
//!
//! # Structure
//!
//! - [`html`]: Escaping, the page shell and markdown rendering
//! - [`sections`]: Homepage sections, project modal and contact form
//! - [`chat`]: Chat widget and message log fragment

pub mod chat;
pub mod html;
pub mod sections;

use crate::carousel::CarouselTuning;
use crate::chat::ChatMessage;
use crate::cms::HomepageData;

/// Render the complete homepage.
#[must_use]
pub fn homepage(
    data: &HomepageData,
    messages: &[ChatMessage],
    tuning: &CarouselTuning,
    fallback_title: &str,
) -> String {
    let title: &str = if data.sections.header_title.trim().is_empty() {
        fallback_title
    } else {
        &data.sections.header_title
    };
    html::html_shell(
        title,
        &sections::nav_links(data),
        &sections::homepage_body(data, messages, tuning),
        &data.sections.footer_license,
    )
}

/// Page shown when content could not be loaded.
#[must_use]
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<section class="py-32 text-center"><h1 class="text-3xl font-bold mb-4">Something went wrong</h1><p>{}</p></section>"#,
        html::escape(message)
    );
    html::html_shell(title, &[], &body, "")
}
