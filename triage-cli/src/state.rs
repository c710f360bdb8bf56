use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$TRIAGE_HOME`, else `~/.triage`.
pub fn triage_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TRIAGE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".triage"))
}

pub fn ensure_triage_home() -> Result<PathBuf> {
    let dir = triage_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
