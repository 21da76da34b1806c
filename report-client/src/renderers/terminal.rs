//! Plain terminal rendering of report views

use super::table::TableBuilder;
use super::{ReportRenderer, WrittenAssets};
use crate::compose::{Block, ReportView, SectionView, NO_MAP_PLACEHOLDER};

/// Renders sections as headed text blocks with comfy-table tables.
/// Figures and maps are referenced by the asset path they were written to, if any.
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    assets: WrittenAssets,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference written asset files next to their figures and maps
    pub fn with_assets(mut self, assets: WrittenAssets) -> Self {
        self.assets = assets;
        self
    }

    /// Render one section
    pub fn render_section(&self, section: &SectionView) -> String {
        let mut out = format!("==== {} ====\n", section.title);
        for block in &section.blocks {
            out.push_str(&self.render_block(block));
        }
        out
    }

    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Fields(fields) => fields
                .iter()
                .map(|(label, value)| format!("{}: {}\n", label, value))
                .collect(),
            Block::Table(table) => {
                let rendered = TableBuilder::from_view(table).build();
                match &table.caption {
                    Some(caption) => format!("{}\n{}\n", caption, rendered),
                    None => format!("{}\n", rendered),
                }
            }
            Block::Figure { name, figure } => {
                if figure.is_empty() {
                    format!("Figure {}: not provided\n", name)
                } else {
                    format!("Figure {}: {}\n", name, self.asset_label(name))
                }
            }
            Block::Map { name, fragment } => match fragment {
                Some(_) => format!("Map {}: {}\n", name, self.asset_label(name)),
                None => format!("{}\n", NO_MAP_PLACEHOLDER),
            },
            Block::Notice(message) => format!("! {}\n", message),
        }
    }

    fn asset_label(&self, name: &str) -> String {
        match self.assets.path(name) {
            Some(path) => path.display().to_string(),
            None => "not written (use --assets-dir or --html)".to_string(),
        }
    }
}

impl ReportRenderer for TerminalRenderer {
    fn render(&self, views: &[ReportView]) -> String {
        views
            .iter()
            .flat_map(|view| view.sections.iter())
            .map(|section| self.render_section(section))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
