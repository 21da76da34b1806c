use crate::compose::TableView;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, CellAlignment,
    ContentArrangement, Table,
};

/// Builder for consistently styled terminal tables
#[derive(Clone)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        Self { table }
    }

    /// Table for a composed view; numeric columns are right-aligned
    pub fn from_view(view: &TableView) -> Self {
        let mut builder = Self::new();
        builder.headers(view.headers.iter().cloned());
        for row in &view.rows {
            let cells = row
                .iter()
                .map(|cell| {
                    let numeric = cell.trim_end_matches('%').parse::<f64>().is_ok();
                    let alignment = if numeric {
                        CellAlignment::Right
                    } else {
                        CellAlignment::Left
                    };
                    Cell::new(cell).set_alignment(alignment)
                })
                .collect::<Vec<_>>();
            builder.table.add_row(cells);
        }
        builder
    }

    /// Set bold header cells
    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h.into()).add_attribute(Attribute::Bold))
            .collect();

        self.table.set_header(header_cells);
        self
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row_cells: Vec<Cell> = cells.into_iter().map(|cell| Cell::new(cell.into())).collect();

        self.table.add_row(row_cells);
        self
    }

    pub fn build(self) -> String {
        self.table.to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
