//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use ecotrack::Config;

/// Default configuration content for ecotrack init
pub const DEFAULT_CONFIG: &str = r#"# EcoTrack Configuration
# =======================

[settings]
# Where progress is stored (default: ~/.ecotrack)
# data_dir = "/path/to/data"

# Storage backend: "json" (single ecoProgress.json file) or "sqlite"
storage = "json"

# Points awarded by `ecotrack scan`, `ecotrack carbon` and `ecotrack challenge`
[settings.rewards]
waste_scan = 10
carbon_calc = 25
challenge = 40
"#;

/// Initialize a new EcoTrack configuration
/// By default creates the global config at ~/.ecotrack/config.toml
/// Use --config to specify a custom path
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());
    Ok(())
}
