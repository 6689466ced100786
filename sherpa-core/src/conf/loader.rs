use crate::conf::error::ConfigError;
use crate::conf::types::SherpaConfig;

use std::fs;
use std::path::Path;

/// Loads and validates a TOML config file. Every section is optional.
pub fn load_config(path: &Path) -> Result<SherpaConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = parse_config(&contents).map_err(|e| match e {
        ParseFailure::Toml(source) => ConfigError::parse(path, source),
        ParseFailure::Invalid(err) => err,
    })?;

    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Parses config text that did not come from a file.
pub fn load_config_str(contents: &str) -> Result<SherpaConfig, ConfigError> {
    parse_config(contents).map_err(|e| match e {
        ParseFailure::Toml(source) => ConfigError::parse("<inline>", source),
        ParseFailure::Invalid(err) => err,
    })
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn parse_config(contents: &str) -> Result<SherpaConfig, ParseFailure> {
    let config: SherpaConfig = toml::from_str(contents).map_err(ParseFailure::Toml)?;
    validate(&config).map_err(ParseFailure::Invalid)?;
    Ok(config)
}

fn validate(config: &SherpaConfig) -> Result<(), ConfigError> {
    if config.transform.max_body_bytes == 0 {
        return Err(ConfigError::Invalid {
            reason: "transform.max_body_bytes must be greater than zero".to_string(),
        });
    }

    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "logging.level must not be empty".to_string(),
        });
    }

    Ok(())
}
