use crate::error::{CliError, Result, ResultExt};
use clap::{Args, Parser, Subcommand};
use report_client::config::types::DEFAULT_CONFIG_FILE;
use report_client::{ClientConfig, ConfigLoader, DefaultConfigLoader, Dimension, PredictorField};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "estate")]
#[command(
    author,
    version,
    about = "Filter a real-estate dataset, review analysis reports and predict prices"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration file path
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Backend origin, overriding base_url from the configuration file
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output (debug logs on stderr)
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the configuration file (or defaults) and apply command-line overrides
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = DefaultConfigLoader::load_or_default(&self.config)
            .with_context(|| format!("Failed to load configuration from {}", self.config))?;

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
            config.validate()?;
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dataset header and the options of every filter
    Catalog,

    /// Count matching entries, confirm, then fetch the analysis and model reports
    Report(ReportArgs),

    /// Predict a price from property features
    Predict(PredictArgs),

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[clap(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Operation to analyse (e.g. renting, selling)
    #[clap(long)]
    pub operation: Option<String>,

    /// Property type
    #[clap(long = "type")]
    pub property_type: Option<String>,

    #[clap(long)]
    pub state: Option<String>,

    #[clap(long)]
    pub city: Option<String>,

    #[clap(long)]
    pub neighborhood: Option<String>,

    /// Number of dorms option (e.g. 2+)
    #[clap(long)]
    pub dorm: Option<String>,

    /// Number of toilets option
    #[clap(long)]
    pub toilet: Option<String>,

    /// Number of garages option
    #[clap(long)]
    pub garage: Option<String>,

    #[clap(long)]
    pub min_size: Option<String>,

    #[clap(long)]
    pub max_size: Option<String>,

    #[clap(long)]
    pub min_price: Option<String>,

    #[clap(long)]
    pub max_price: Option<String>,

    /// Set any filter as FILTER=VALUE (repeatable)
    #[clap(long = "set", value_name = "FILTER=VALUE")]
    pub set: Vec<String>,

    /// Proceed without asking for confirmation
    #[clap(short, long, default_value_t = false)]
    pub yes: bool,

    /// Write a self-contained HTML report to this path
    #[clap(long)]
    pub html: Option<String>,

    /// Directory for decoded figures and maps (defaults to the configured assets_dir)
    #[clap(long)]
    pub assets_dir: Option<String>,

    /// Do not write figure and map files
    #[clap(long, default_value_t = false)]
    pub no_assets: bool,

    /// Include the features importance figure when the model report has one
    #[clap(long, default_value_t = false)]
    pub features_importance: bool,
}

impl ReportArgs {
    /// Filter assignments in command-line order: named flags first, then --set pairs
    pub fn assignments(&self) -> Result<Vec<(Dimension, String)>> {
        let named = [
            (Dimension::Operation, &self.operation),
            (Dimension::PropertyType, &self.property_type),
            (Dimension::State, &self.state),
            (Dimension::City, &self.city),
            (Dimension::Neighborhood, &self.neighborhood),
            (Dimension::DormCount, &self.dorm),
            (Dimension::ToiletCount, &self.toilet),
            (Dimension::GarageCount, &self.garage),
            (Dimension::MinSize, &self.min_size),
            (Dimension::MaxSize, &self.max_size),
            (Dimension::MinPrice, &self.min_price),
            (Dimension::MaxPrice, &self.max_price),
        ];

        let mut assignments: Vec<(Dimension, String)> = named
            .into_iter()
            .filter_map(|(dimension, value)| value.clone().map(|v| (dimension, v)))
            .collect();
        assignments.extend(parse_pairs::<Dimension>(&self.set)?);
        Ok(assignments)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PredictArgs {
    /// Operation the price is predicted for
    #[clap(long, value_parser = ["renting", "selling"])]
    pub operation: Option<String>,

    /// Size in square meters
    #[clap(long)]
    pub size: Option<String>,

    #[clap(long)]
    pub dorms: Option<String>,

    #[clap(long)]
    pub toilets: Option<String>,

    #[clap(long)]
    pub garage: Option<String>,

    /// 1 for apartment, 0 for house
    #[clap(long = "type")]
    pub property_type: Option<String>,

    /// Location cluster code
    #[clap(long)]
    pub location: Option<String>,

    /// Set any input as INPUT=VALUE (repeatable)
    #[clap(long = "set", value_name = "INPUT=VALUE")]
    pub set: Vec<String>,
}

impl PredictArgs {
    pub fn assignments(&self) -> Result<Vec<(PredictorField, String)>> {
        let named = [
            (PredictorField::Operation, &self.operation),
            (PredictorField::Size, &self.size),
            (PredictorField::Dorms, &self.dorms),
            (PredictorField::Toilets, &self.toilets),
            (PredictorField::Garage, &self.garage),
            (PredictorField::PropertyTypeFlag, &self.property_type),
            (PredictorField::LocationCode, &self.location),
        ];

        let mut assignments: Vec<(PredictorField, String)> = named
            .into_iter()
            .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
            .collect();
        assignments.extend(parse_pairs::<PredictorField>(&self.set)?);
        Ok(assignments)
    }
}

/// Parse `NAME=VALUE` pairs; names are resolved with `FromStr`
fn parse_pairs<K>(pairs: &[String]) -> Result<Vec<(K, String)>>
where
    K: FromStr<Err = report_client::ReportClientError>,
{
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                CliError::Usage(format!("Expected NAME=VALUE, got '{}'", pair))
            })?;
            let key = name
                .parse::<K>()
                .map_err(|e| CliError::Usage(e.to_string()))?;
            Ok((key, value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_report_flags_and_pairs() {
        let cli = Cli::try_parse_from([
            "estate",
            "report",
            "--operation",
            "selling",
            "--min-price",
            "1000",
            "--set",
            "city=Campinas",
            "--set",
            "max-size=120",
            "--yes",
        ])
        .unwrap();

        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert!(args.yes);
        assert_eq!(
            args.assignments().unwrap(),
            vec![
                (Dimension::Operation, "selling".to_string()),
                (Dimension::MinPrice, "1000".to_string()),
                (Dimension::City, "Campinas".to_string()),
                (Dimension::MaxSize, "120".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_filter_is_usage_error() {
        let args = ReportArgs {
            set: vec!["color=blue".to_string()],
            ..Default::default()
        };
        let err = args.assignments().unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert!(err.user_message().contains("Unknown filter 'color'"));

        let args = ReportArgs {
            set: vec!["city".to_string()],
            ..Default::default()
        };
        assert!(args.assignments().is_err());
    }

    #[test]
    fn test_predict_operation_is_restricted() {
        assert!(Cli::try_parse_from(["estate", "predict", "--operation", "leasing"]).is_err());

        let cli = Cli::try_parse_from(["estate", "predict", "--type", "1", "--set", "location=4"])
            .unwrap();
        let Commands::Predict(args) = cli.command else {
            panic!("expected predict command");
        };
        assert_eq!(
            args.assignments().unwrap(),
            vec![
                (PredictorField::PropertyTypeFlag, "1".to_string()),
                (PredictorField::LocationCode, "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli =
            Cli::try_parse_from(["estate", "catalog", "--base-url", "http://backend:8000", "-v"])
                .unwrap();
        assert!(cli.global.verbose);
        assert_eq!(cli.global.base_url.as_deref(), Some("http://backend:8000"));
        assert_eq!(cli.global.config, DEFAULT_CONFIG_FILE);
    }

    #[test]
    fn test_base_url_override_wins_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("estate.toml");
        fs::write(&path, "base_url = \"http://file:5000\"\ntimeout_seconds = 7\n").unwrap();

        let global = GlobalArgs {
            config: path.to_string_lossy().to_string(),
            base_url: Some("http://flag:6000".to_string()),
            verbose: false,
        };
        let config = global.load_config().unwrap();
        assert_eq!(config.base_url, "http://flag:6000");
        assert_eq!(config.timeout_seconds, 7);

        let invalid = GlobalArgs {
            base_url: Some("not a url".to_string()),
            ..global
        };
        assert!(invalid.load_config().is_err());
    }
}
