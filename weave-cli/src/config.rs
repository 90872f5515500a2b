use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use weave_core::BuildConfig;

/// Optional configuration file, read from the working directory
pub const CONFIG_FILE: &str = "weave.toml";

/// Complete configuration that merges the CLI flag, env vars, config file, and defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WeaveConfig {
    /// Build configuration (from weave-core)
    #[serde(default)]
    pub build: BuildConfig,
    /// Continuous mode configuration
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Rebuild whenever a source page changes
    pub enabled: bool,
    /// Quiet period before a burst of changes triggers a rebuild
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            debounce_ms: 300,
        }
    }
}

impl WeaveConfig {
    /// Load configuration with cascading precedence:
    /// 1. `--watch` flag (highest priority)
    /// 2. Environment variables (WEAVE_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        Self::load_from(args, Path::new(CONFIG_FILE))
    }

    pub fn load_from(args: &ArgMatches, config_file: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(ConfigBuilder::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if config_file.exists() {
            builder = builder.add_source(File::from(config_file));
        }

        // 3. Add environment variables with WEAVE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("WEAVE")
                .prefix_separator("_")
                .separator("__") // Use double underscore for nested keys
                .try_parsing(true),
        );

        // 4. Override with the CLI flag
        if args.try_get_one::<bool>("watch").unwrap_or(None) == Some(&true) {
            builder = builder.set_override("watch.enabled", true)?;
        }

        let config = builder.build()?;
        let weave_config: WeaveConfig = config.try_deserialize()?;

        Ok(weave_config)
    }
}
