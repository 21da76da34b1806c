//! Presentation of composed report views
//!
//! Renderers never look at wire payloads. They take the [`ReportView`]s built
//! by the composer and turn them into terminal text, an HTML document, or
//! files on disk.

use crate::compose::ReportView;

/// Render composed report views into a single string
pub trait ReportRenderer {
    fn render(&self, views: &[ReportView]) -> String;
}

pub mod assets;
pub mod html;
pub mod table;
pub mod terminal;

pub use assets::{write_assets, WrittenAssets};
pub use html::HtmlRenderer;
pub use table::TableBuilder;
pub use terminal::TerminalRenderer;
