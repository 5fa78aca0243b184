//! Layered JSON configuration.
//!
//! Tiers, lowest priority first:
//!  1. Global  `~/.comment-checker/config.json`
//!  2. Project `<cwd>/.comment-checker.json`
//!
//! Tiers are deep-merged (objects by key, everything else last write wins) and then
//! deserialized. Missing files are empty tiers; unreadable or malformed files
//! print a warning and are skipped.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = ".comment-checker.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run docstring queries in addition to comment queries.
    pub include_docstrings: bool,

    /// Drop every docstring (and `/** */` block) before reporting.
    pub suppress_docstrings: bool,

    /// Replaces the default report. `{{comments}}` is substituted with the per-file blocks.
    pub custom_prompt: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_docstrings: true,
            suppress_docstrings: false,
            custom_prompt: None,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".comment-checker")
        .join("config.json")
}

/// Recursively merge `src` into `dst`: objects merge by key, anything else
/// (including arrays) is overwritten by `src`.
pub fn deep_merge(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(d), Value::Object(s)) => {
            for (k, v) in s {
                deep_merge(d.entry(k).or_insert(Value::Null), v);
            }
        }
        (dst, src) => *dst = src,
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_tier_into(merged: &mut Value, path: &Path) {
    if !path.exists() {
        return;
    }
    match read_json(path) {
        Ok(v) if v.is_object() => deep_merge(merged, v),
        Ok(_) => eprintln!("[comment-checker] WARN {} is not a JSON object, ignoring", path.display()),
        Err(e) => eprintln!("[comment-checker] WARN {e:#}"),
    }
}

/// Merge the given tier files (lowest priority first) into a `Config`.
pub fn load_config_from(tiers: &[PathBuf]) -> Config {
    let mut merged = Value::Object(Map::new());
    for path in tiers {
        load_tier_into(&mut merged, path);
    }
    match serde_json::from_value::<Config>(merged) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[comment-checker] WARN invalid config, using defaults: {e}");
            Config::default()
        }
    }
}

/// Global tier, then `<project_dir>/.comment-checker.json`.
pub fn load_config(project_dir: &Path) -> Config {
    load_config_from(&[global_config_path(), project_dir.join(PROJECT_CONFIG_FILE)])
}

/// The hook's `cwd` when it sent one, else the process working directory.
pub fn project_dir(cwd: &str) -> PathBuf {
    if !cwd.trim().is_empty() {
        return PathBuf::from(cwd);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Command-line flags layered on top of the file tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub custom_prompt: Option<String>,
    pub no_docstrings: bool,
    pub suppress_docstrings: bool,
}

impl Overrides {
    pub fn apply(&self, mut cfg: Config) -> Config {
        if let Some(prompt) = &self.custom_prompt {
            cfg.custom_prompt = Some(prompt.clone());
        }
        if self.no_docstrings {
            cfg.include_docstrings = false;
        }
        if self.suppress_docstrings {
            cfg.suppress_docstrings = true;
        }
        cfg
    }

    /// Load the tiers for `cwd` and apply the flags.
    pub fn resolve(&self, cwd: &str) -> Config {
        self.apply(load_config(&project_dir(cwd)))
    }
}
