//! Upload form rendering.

use super::flash::FlashMessage;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const FLASHES_PLACEHOLDER: &str = "{{flashes}}";

/// Render the upload form with any pending flash messages above it.
pub fn render_index(flashes: &[FlashMessage]) -> String {
    INDEX_TEMPLATE.replace(FLASHES_PLACEHOLDER, &render_flashes(flashes))
}

fn render_flashes(flashes: &[FlashMessage]) -> String {
    if flashes.is_empty() {
        return String::new();
    }

    let items: String = flashes
        .iter()
        .map(|flash| {
            format!(
                "<li class=\"flash flash-{}\">{}</li>",
                html_escape(&flash.category),
                html_escape(&flash.message)
            )
        })
        .collect();

    format!("<ul class=\"flashes\">{items}</ul>")
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
