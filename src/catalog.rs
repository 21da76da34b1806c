use crate::cli::GlobalArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::progress;
use crate::ui;
use report_client::renderers::TableBuilder;
use report_client::{Dimension, FilterState, HttpReportClient, compose_catalog_header};
use report_client::compose::Block;
use tokio::runtime::Runtime;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(execute_async(global))
}

async fn execute_async(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let client = HttpReportClient::new(config)?;

    let pb = progress::spinner("Loading option catalog...");
    let filters = FilterState::bootstrap(&client).await;
    pb.finish_and_clear();
    let filters = filters.with_context(|| "Failed to load the option catalog")?;

    print_catalog_header(&filters);
    println!("{}", options_table(&filters));
    Ok(())
}

/// "Information About" header with the dataset's last update
pub fn print_catalog_header(filters: &FilterState) {
    let header = compose_catalog_header(filters.catalog());
    ui::section_header(&header.title);
    for block in &header.blocks {
        if let Block::Fields(fields) = block {
            for (label, value) in fields {
                ui::field_line(label, value);
            }
        }
    }
}

fn options_table(filters: &FilterState) -> String {
    let mut builder = TableBuilder::new();
    builder.headers(["Filter", "Name", "Default", "Options"]);
    for dimension in Dimension::ALL {
        let options = if dimension.is_range() {
            "free numeric input".to_string()
        } else {
            filters.options(dimension).join(", ")
        };
        builder.row([
            dimension.label().to_string(),
            dimension.name().to_string(),
            filters.get(dimension).to_string(),
            options,
        ]);
    }
    builder.build()
}
