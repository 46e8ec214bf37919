//! Check command implementation

use crate::cli::{output, CheckArgs, Cli};
use crate::config::FlavorCheckConfig;
use crate::decision::FlavorResolver;
use std::path::Path;

/// Load configuration with CLI overrides
///
/// A missing config file is not an error; defaults apply.
pub fn load_config_with_overrides(
    cli: &Cli,
    cache_path: Option<&Path>,
) -> anyhow::Result<FlavorCheckConfig> {
    let mut config = if cli.config.exists() {
        FlavorCheckConfig::load(Some(&cli.config))?
    } else {
        tracing::debug!(path = %cli.config.display(), "Config file not found, using defaults");
        FlavorCheckConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(path) = cache_path {
        config.paths.cache = path.to_path_buf();
    }

    config.validate()?;
    Ok(config)
}

/// Handle `instance-flavor-check check`
///
/// Prints the flavor and returns the process exit code for it.
pub async fn handle_check(args: &CheckArgs, config: &FlavorCheckConfig) -> anyhow::Result<i32> {
    let resolver = FlavorResolver::from_config(config);
    let outcome = resolver.resolve().await?;

    println!("{}", output::format_outcome(&outcome, args.json)?);
    Ok(outcome.exit_code())
}
