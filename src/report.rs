use crate::catalog::print_catalog_header;
use crate::cli::{GlobalArgs, ReportArgs};
use crate::error::{CliError, Result, ResultExt};
use crate::gate::PromptGate;
use crate::progress::{self, QueryProgress};
use crate::ui;
use indicatif::ProgressBar;
use report_client::renderers::write_assets;
use report_client::{
    AutoConfirm, ConfirmationGate, Dimension, FieldValue, FilterSelection, FilterState,
    HtmlRenderer, HttpReportClient, QueryOrchestrator, QueryOutcome, QueryState, ReportRenderer,
    ReportSlot, TerminalRenderer, WrittenAssets, compose_state,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

pub fn execute(global: &GlobalArgs, args: ReportArgs) -> Result<()> {
    // Reject unknown filters before touching the network
    let assignments = args.assignments()?;

    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(execute_async(global, args, assignments))
}

/// Ranges are numeric when they parse as numbers; option filters stay text
pub fn filter_value(dimension: Dimension, raw: &str) -> FieldValue {
    if dimension.is_range() {
        FieldValue::from_input(raw)
    } else {
        FieldValue::from(raw.trim())
    }
}

async fn execute_async(
    global: &GlobalArgs,
    args: ReportArgs,
    assignments: Vec<(Dimension, String)>,
) -> Result<()> {
    let config = global.load_config()?;
    let show_features = args.features_importance || config.report.show_features_importance;
    let assets_dir = args
        .assets_dir
        .clone()
        .unwrap_or_else(|| config.report.assets_dir.clone());
    let client = Arc::new(HttpReportClient::new(config)?);

    let pb = progress::spinner("Loading option catalog...");
    let filters = FilterState::bootstrap(client.as_ref()).await;
    pb.finish_and_clear();
    let mut filters = filters.with_context(|| "Failed to load the option catalog")?;

    print_catalog_header(&filters);
    for (dimension, raw) in assignments {
        filters.set(dimension, filter_value(dimension, &raw));
    }
    for dimension in filters.out_of_catalog() {
        ui::warning_message(&format!(
            "{} '{}' is not one of the catalog options",
            dimension.label(),
            filters.get(dimension)
        ));
    }
    print_selection(&filters);

    let pb = progress::spinner("Counting matching entries...");
    let selection = filters.snapshot();
    let (outcome, state) = if args.yes {
        run_query(client, AutoConfirm(true), selection, pb).await?
    } else {
        let gate = PromptGate::new(pb.clone());
        run_query(client, gate, selection, pb).await?
    };

    match outcome {
        QueryOutcome::Ready => present(&state, &args, show_features, &assets_dir),
        QueryOutcome::Idle => {
            ui::warning_message("Aborted by user; no reports were requested");
            Ok(())
        }
        QueryOutcome::PartialFailure { error } => Err(CliError::Other(format!(
            "Counting entries failed, no reports were requested: {}",
            error
        ))),
        QueryOutcome::Cancelled { reason } => Err(CliError::Other(format!(
            "{}. Pass --yes to proceed without a prompt",
            reason
        ))),
        other => Err(CliError::Other(format!(
            "Query stopped before settling ({:?})",
            other
        ))),
    }
}

async fn run_query<G>(
    client: Arc<HttpReportClient>,
    gate: G,
    selection: FilterSelection,
    pb: ProgressBar,
) -> Result<(QueryOutcome, QueryState)>
where
    G: ConfirmationGate + 'static,
{
    let progress = QueryProgress::new(pb);
    let mut orchestrator = QueryOrchestrator::with_shared(client, Arc::new(gate));

    let generation = orchestrator.try_submit(selection)?;
    debug!(generation, "report query submitted");
    let outcome = orchestrator
        .run_until_settled(|event, state| progress.on_event(event, state))
        .await;
    progress.finish();

    Ok((outcome, orchestrator.state().clone()))
}

fn print_selection(filters: &FilterState) {
    ui::section_header("Filters");
    for dimension in Dimension::ALL {
        let value = filters.get(dimension);
        if !value.is_empty() {
            ui::field_line(dimension.label(), &value.to_string());
        }
    }
}

fn present(state: &QueryState, args: &ReportArgs, show_features: bool, assets_dir: &str) -> Result<()> {
    let views = compose_state(state, show_features);

    let assets = if args.no_assets {
        WrittenAssets::default()
    } else {
        write_assets(&views, Path::new(assets_dir))
            .with_context(|| format!("Failed to write report assets to {}", assets_dir))?
    };

    println!("{}", TerminalRenderer::new().with_assets(assets.clone()).render(&views));

    if !assets.is_empty() {
        ui::info_message(&format!("{} figure and map files written to {}", assets.len(), assets_dir));
    }

    if let Some(html_path) = &args.html {
        let document = HtmlRenderer::new().render(&views);
        fs::write(html_path, document)
            .with_context(|| format!("Failed to write HTML report to {}", html_path))?;
        ui::success_message(&format!("HTML report written to {}", html_path));
    }

    let failed = [
        matches!(state.analysis(), ReportSlot::Unavailable(_)),
        matches!(state.model(), ReportSlot::Unavailable(_)),
    ];
    if failed.iter().any(|f| *f) {
        ui::warning_message("Some report sections could not be loaded");
    }
    Ok(())
}
