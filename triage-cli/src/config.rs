use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use triage_core::{StrategyWeights, DEFAULT_SUGGESTIONS};

use crate::state::{ensure_triage_home, triage_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Strategy name; unknown names fall back to smart_balance.
    pub strategy: String,

    /// IANA timezone whose local date counts as "today".
    pub timezone: String,

    pub suggest_limit: usize,

    /// Custom weights; used only when neither flags nor the task file name a
    /// strategy or weights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<StrategyWeights>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            strategy: "smart_balance".to_string(),
            timezone: "UTC".to_string(),
            suggest_limit: DEFAULT_SUGGESTIONS,
            weights: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(triage_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_triage_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg = parse_config(
            r#"
[analysis]
strategy = "deadline_driven"
"#,
        )
        .unwrap();
        assert_eq!(cfg.analysis.strategy, "deadline_driven");
        assert_eq!(cfg.analysis.timezone, "UTC");
        assert_eq!(cfg.analysis.suggest_limit, 3);
        assert_eq!(cfg.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_custom_weights_section() {
        let cfg = parse_config(
            r#"
[analysis.weights]
urgency = 0.5
effort = 0.5

[output]
format = "json"
"#,
        )
        .unwrap();
        let w = cfg.analysis.weights.unwrap();
        assert_eq!(w.urgency, 0.5);
        assert_eq!(w.importance, 0.0);
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_default_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }
}
