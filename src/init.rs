use crate::cli::GlobalArgs;
use crate::error::{Result, ResultExt};
use crate::ui;
use report_client::config::ensure_config_file_exists;

pub fn execute(global: &GlobalArgs, force: bool) -> Result<()> {
    let written = ensure_config_file_exists(&global.config, force)
        .with_context(|| format!("Failed to write {}", global.config))?;

    if written {
        ui::success_message(&format!("Configuration written to {}", global.config));
        ui::info_message("Edit base_url to point at your analysis backend");
    } else {
        ui::warning_message(&format!(
            "{} already exists; pass --force to overwrite it",
            global.config
        ));
    }
    Ok(())
}
