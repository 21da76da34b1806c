use crate::error::Result;
use std::fs;
use std::path::Path;

/// Generate the default estate.toml template
pub fn generate_default_config_template() -> String {
    r#"# Real-estate report client configuration

# Backend origin serving the catalog, count, analysis, model and prediction endpoints
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds
timeout_seconds = 30

# Endpoint paths relative to base_url (optional)
[endpoints]
catalog = "/initial"
count = "/get_entries_count"
analysis = "/get_analysis"
model = "/get_model"
prediction = "/get_prediction"

[report]
# Render the features-importance figure when the model report carries one
show_features_importance = false
# Where decoded figures and map fragments are written
assets_dir = "report-assets"
"#
    .to_string()
}

/// Write the default configuration file. Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P, overwrite: bool) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() && !overwrite {
        return Ok(false);
    }

    fs::write(path, generate_default_config_template())?;
    Ok(true)
}
