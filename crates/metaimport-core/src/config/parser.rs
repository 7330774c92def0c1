//! TOML parser with helpful error messages

use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a config file with detailed error messages
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse config content from string
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(url) = &config.docs_base_url {
        url::Url::parse(url).with_context(|| format!("Invalid docs_base_url: {}", url))?;
    }
    Ok(())
}

/// Enhance TOML parsing errors with the offending line
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let line = error.span().map(|span| {
        let line_num = content[..span.start.min(content.len())].matches('\n').count() + 1;
        (line_num, content.lines().nth(line_num - 1).unwrap_or_default())
    });

    match line {
        Some((line_num, text)) => anyhow::anyhow!(
            "TOML parsing error at line {}:\n  {}\n\nError: {}",
            line_num,
            text,
            error.message()
        ),
        None => anyhow::anyhow!("TOML parsing error: {}", error.message()),
    }
}
