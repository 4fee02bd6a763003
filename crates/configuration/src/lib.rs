use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    DataSettings, ImpactSettings, IndicatorSettings, LogFormat, LoggingSettings, MetricsSettings,
    Settings,
};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "coinscope.toml";

/// Prefix of environment variables that override file values, e.g.
/// `COINSCOPE_DATA__DIRECTORY=/srv/data`.
pub const ENV_PREFIX: &str = "COINSCOPE";

/// Loads the application configuration.
///
/// Reads `path` when given (it must exist), otherwise an optional
/// `coinscope.toml` in the working directory, then applies `COINSCOPE_*`
/// environment overrides, deserializes into our strongly-typed `Settings`
/// struct and validates it.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_config_with(path, env_overrides())
}

/// `COINSCOPE_SECTION__KEY` variables; list keys take comma-separated values,
/// e.g. `COINSCOPE_IMPACT__COINS=ETH,LINK`.
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("impact.coins")
        .try_parsing(true)
}

fn load_config_with(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    tracing::debug!("Loaded configuration: {:?}", settings);
    Ok(settings)
}

/// Rejects values that would make every analysis meaningless.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.indicators.default_period == 0 {
        return Err(ConfigError::ValidationError(
            "indicators.default_period must be at least 1".to_string(),
        ));
    }
    if !(settings.metrics.periods_per_year > 0.0) {
        return Err(ConfigError::ValidationError(
            "metrics.periods_per_year must be positive".to_string(),
        ));
    }
    if !settings.metrics.risk_free_rate.is_finite() {
        return Err(ConfigError::ValidationError(
            "metrics.risk_free_rate must be a finite number".to_string(),
        ));
    }
    if settings.impact.pre_suffix == settings.impact.post_suffix {
        return Err(ConfigError::ValidationError(
            "impact.pre_suffix and impact.post_suffix must differ".to_string(),
        ));
    }
    Ok(())
}
