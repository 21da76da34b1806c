//! Report composition
//!
//! Pure mapping from fetched payloads to display sections. Renderers only
//! ever see a [`ReportView`], so every number shown to the user is formatted
//! here, exactly once.

use crate::query::ReportKind;
use crate::types::{
    AnalysisReport, Figure, LocationSummaryRow, MapFragment, ModelReport, OptionCatalog,
    PredictionResult, TypeSummaryRow,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder shown where a map fragment is empty
pub const NO_MAP_PLACEHOLDER: &str = "No map available";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ordered display sections of one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub sections: Vec<SectionView>,
}

/// One independently renderable unit of the report
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Labelled values, rendered as `label: value`
    Fields(Vec<(String, String)>),
    Table(TableView),
    /// Raster figure; `name` is a stable asset stem
    Figure { name: String, figure: Figure },
    /// Map markup; `None` when the backend sent an empty fragment
    Map {
        name: String,
        fragment: Option<MapFragment>,
    },
    /// Inline message in place of content that could not be loaded
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SectionView {
    fn new(title: &str, blocks: Vec<Block>) -> Self {
        Self {
            title: title.to_string(),
            blocks,
        }
    }
}

/// Two decimal places; applying it to its own output is a no-op
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Ratio in `[0, 1]` shown as a percentage with two decimals
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", format_fixed2(ratio * 100.0))
}

/// Normalise a served timestamp when it is recognisable; otherwise keep it as received
pub fn format_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Dataset header shown above the filters
pub fn compose_catalog_header(catalog: &OptionCatalog) -> SectionView {
    SectionView::new(
        &format!("Information About: {} real states", catalog.entries),
        vec![Block::Fields(vec![(
            "Last Update".to_string(),
            format_timestamp(&catalog.update),
        )])],
    )
}

/// Summary header, two summary tables with their figures, and both maps
pub fn compose_analysis(report: &AnalysisReport) -> ReportView {
    let summary = SectionView::new(
        "Report Summary",
        vec![Block::Fields(vec![
            (
                "Effective Entries Processed".to_string(),
                report.effective_entries_processed.to_string(),
            ),
            (
                "Reference Operation".to_string(),
                report.reference_operation.clone(),
            ),
            (
                "Locations Clusters Selected".to_string(),
                report.location_cluster_count.to_string(),
            ),
        ])],
    );

    let by_type = SectionView::new(
        "Summary by Type (Means)",
        vec![
            Block::Table(type_table(&report.per_type_summary)),
            Block::Figure {
                name: "type_distribution".to_string(),
                figure: report.type_distribution_figure.clone(),
            },
        ],
    );

    let by_location = SectionView::new(
        "Summary by Location (Means)",
        vec![
            Block::Table(location_table(&report.per_location_summary)),
            Block::Figure {
                name: "locations_plots".to_string(),
                figure: report.location_plots_figure.clone(),
            },
        ],
    );

    ReportView {
        sections: vec![
            summary,
            by_type,
            by_location,
            map_section("Locations Clusters Map", "clusters_map", &report.cluster_map_fragment),
            map_section("Price Heatmap", "price_heatmap", &report.price_heatmap_fragment),
        ],
    }
}

/// Model metrics, summary statistics and figures
pub fn compose_model(report: &ModelReport, show_features_importance: bool) -> ReportView {
    let mut sections = Vec::new();

    if show_features_importance {
        if let Some(figure) = &report.features_importance_figure {
            sections.push(SectionView::new(
                "Features Importance",
                vec![Block::Figure {
                    name: "features_importance".to_string(),
                    figure: figure.clone(),
                }],
            ));
        }
    }

    let metrics = &report.error_metrics;
    let stats = &report.summary_statistics;
    sections.push(SectionView::new(
        "Predictor Model Summary",
        vec![
            Block::Fields(vec![
                ("Model".to_string(), report.model_name.clone()),
                ("MSE".to_string(), format_fixed2(metrics.mean_squared_error)),
                ("MAE".to_string(), format_fixed2(metrics.mean_absolute_error)),
                ("R2 Score".to_string(), format_fixed2(metrics.r_squared)),
            ]),
            Block::Table(TableView {
                caption: Some("Summary Statistics".to_string()),
                headers: strings(&[
                    "Average Actual Price",
                    "Average Predicted Price",
                    "Average Absolute Error",
                    "Average Percentage Error (%)",
                ]),
                rows: vec![vec![
                    format_fixed2(stats.average_actual_price),
                    format_fixed2(stats.average_predicted_price),
                    // both error averages are served as fractions
                    format_fixed2(stats.average_absolute_error * 100.0),
                    format_fixed2(stats.average_percentage_error * 100.0),
                ]],
            }),
            Block::Figure {
                name: "predictions_plot".to_string(),
                figure: report.predictions_plot_figure.clone(),
            },
        ],
    ));

    ReportView { sections }
}

/// Section standing in for a report whose fetch failed
pub fn compose_unavailable(kind: ReportKind, error: &str) -> ReportView {
    let title = match kind {
        ReportKind::Analysis => "Report Summary",
        ReportKind::Model => "Predictor Model Summary",
    };
    ReportView {
        sections: vec![SectionView::new(
            title,
            vec![Block::Notice(format!("{} report unavailable: {}", kind, error))],
        )],
    }
}

/// Predicted values as labelled fields
pub fn compose_prediction(result: &PredictionResult) -> Vec<(String, String)> {
    let mut fields = vec![("Predicted Price".to_string(), format_fixed2(result.price()))];
    if let Some(costs) = result.additional_costs() {
        fields.push(("Predicted Additional Costs".to_string(), format_fixed2(costs)));
    }
    fields
}

fn type_table(rows: &[TypeSummaryRow]) -> TableView {
    TableView {
        caption: None,
        headers: strings(&[
            "Type",
            "Size",
            "Dorms",
            "Toilets",
            "Garage",
            "Price",
            "Additional Costs",
            "Price per Sqm",
        ]),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.property_type.to_string(),
                    format_fixed2(row.size),
                    format_fixed2(row.dorms),
                    format_fixed2(row.toilets),
                    format_fixed2(row.garage),
                    format_fixed2(row.price),
                    format_fixed2(row.additional_costs),
                    format_fixed2(row.price_per_sqm),
                ]
            })
            .collect(),
    }
}

fn location_table(rows: &[LocationSummaryRow]) -> TableView {
    TableView {
        caption: None,
        headers: strings(&[
            "Location",
            "Price/sqm",
            "Price",
            "Count",
            "Size",
            "Apartment Ratio",
            "House Ratio",
            "Additional Costs",
            "Dorms",
            "Toilets",
            "Garages",
        ]),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.location.to_string(),
                    format_fixed2(row.price_per_sqm),
                    format_fixed2(row.price),
                    row.count.to_string(),
                    format_fixed2(row.size),
                    format_percent(row.apartment_ratio),
                    format_percent(row.house_ratio),
                    format_fixed2(row.additional_costs),
                    format_fixed2(row.dorms),
                    format_fixed2(row.toilets),
                    format_fixed2(row.garages),
                ]
            })
            .collect(),
    }
}

fn map_section(title: &str, name: &str, fragment: &MapFragment) -> SectionView {
    SectionView::new(
        title,
        vec![Block::Map {
            name: name.to_string(),
            fragment: (!fragment.is_empty()).then(|| fragment.clone()),
        }],
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
