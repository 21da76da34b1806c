//! Self-contained HTML report

use super::ReportRenderer;
use crate::compose::{Block, ReportView, SectionView, TableView, NO_MAP_PLACEHOLDER};

const STYLES: &str = r#"<style>
body { font-family: sans-serif; margin: 2rem; color: #222; }
section { margin-bottom: 2rem; }
table { border-collapse: collapse; margin: 0.5rem 0; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: right; }
th { background: #f3f3f3; }
img { max-width: 100%; }
.placeholder { color: #888; font-style: italic; }
.error { color: #b00020; }
</style>"#;

/// HTML renderer producing one document with figures embedded as data URIs
pub struct HtmlRenderer {
    pub title: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            title: "Real Estate Report".to_string(),
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&self, views: &[ReportView]) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", html_escape(&self.title)));
        html.push_str(STYLES);
        html.push_str("\n</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", html_escape(&self.title)));

        for section in views.iter().flat_map(|view| view.sections.iter()) {
            html.push_str(&format_section(section));
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn format_section(section: &SectionView) -> String {
    let mut html = format!("<section>\n<h2>{}</h2>\n", html_escape(&section.title));
    for block in &section.blocks {
        html.push_str(&format_block(block));
    }
    html.push_str("</section>\n");
    html
}

fn format_block(block: &Block) -> String {
    match block {
        Block::Fields(fields) => fields
            .iter()
            .map(|(label, value)| {
                format!(
                    "<p><strong>{}:</strong> {}</p>\n",
                    html_escape(label),
                    html_escape(value)
                )
            })
            .collect(),
        Block::Table(table) => format_table(table),
        Block::Figure { name, figure } if figure.is_empty() => format!(
            "<p class=\"placeholder\">Figure {} not provided</p>\n",
            html_escape(name)
        ),
        Block::Figure { name, figure } => format!(
            "<img alt=\"{}\" src=\"{}\">\n",
            html_escape(name),
            figure.data_uri()
        ),
        // Map fragments are trusted markup from the backend and embedded as-is
        Block::Map {
            name,
            fragment: Some(fragment),
        } => format!(
            "<div class=\"map\" id=\"{}\">\n{}\n</div>\n",
            html_escape(name),
            fragment.as_str()
        ),
        Block::Map { fragment: None, .. } => {
            format!("<p class=\"placeholder\">{}</p>\n", NO_MAP_PLACEHOLDER)
        }
        Block::Notice(message) => format!("<p class=\"error\">{}</p>\n", html_escape(message)),
    }
}

fn format_table(table: &TableView) -> String {
    let mut html = String::from("<table>\n");
    if let Some(caption) = &table.caption {
        html.push_str(&format!("<caption>{}</caption>\n", html_escape(caption)));
    }
    html.push_str("<tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", html_escape(header)));
    }
    html.push_str("</tr>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", html_escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
