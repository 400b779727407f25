//! HTML building blocks shared by every page and fragment.

use chrono::{Datelike, Utc};
use pulldown_cmark::{Event, Options, Parser};

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render markdown (with GFM tables, strikethrough and task lists) to HTML.
///
/// Raw HTML in the source is emitted as escaped text.
#[must_use]
pub fn markdown_view(markdown: &str, class: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut body, events);
    format!(r#"<div class="markdown prose max-w-none {class}">{body}</div>"#)
}

/// Navigation entry in the header.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Generate the HTML shell for a page.
#[must_use]
pub fn html_shell(title: &str, nav: &[NavLink], content: &str, footer_license: &str) -> String {
    let title = escape(title);
    let nav_items: String = nav
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}" class="px-3 py-2 rounded-xl text-sm hover:bg-surface transition-all">{}</a>"#,
                escape(&link.href),
                escape(&link.label)
            )
        })
        .collect();
    let year = Utc::now().year();
    let license = escape(footer_license);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <script type="module" src="/static/main.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-background antialiased">
    <header id="site-header" class="sticky top-0 z-50 w-full backdrop-blur shadow-sm">
        <div class="container mx-auto flex h-16 items-center justify-between px-4 max-w-5xl">
            <a href="#" class="font-semibold text-lg">{title}</a>
            <burger-menu class="md:hidden"></burger-menu>
            <nav class="hidden md:flex items-center gap-1">{nav_items}</nav>
        </div>
    </header>
    <main id="app">
        {content}
    </main>
    <footer class="py-6">
        <p class="text-xs text-center">&copy; {year} {title}. {license}</p>
    </footer>
    <div id="project-modal"></div>
</body>
</html>"##
    )
}
