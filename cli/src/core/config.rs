//! # devrun Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, merges and validates devrun's TOML configuration. Today the only
//! section is `[deps]`, which describes the dependency-update commands run by
//! `devrun deps`.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file given with `--config` or `DEVRUN_CONFIG` (must exist;
//!    no other source is consulted)
//! 2. Project-specific `.devrun.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Each file is read as a layer in which every key is optional; a key written
//! in a higher layer replaces the lower one even when it matches the default.
//! `~` in directories is expanded, and relative directories in a project or
//! explicit file are taken relative to that file's directory, so
//! `.devrun.toml` works from any subdirectory. Unknown keys are rejected so
//! typos surface immediately.
//!
//! ## Example
//!
//! ```toml
//! [deps]
//! dir = "server"
//! env = { GOPROXY = "direct" }
//!
//! [[deps.steps]]
//! program = "go"
//! args = ["get", "-u", "."]
//!
//! [[deps.steps]]
//! program = "go"
//! args = ["mod", "tidy"]
//! ```
//!
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{DevrunError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The effective configuration after all sources are merged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub deps: DepsConfig,
}

/// Settings for `devrun deps`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepsConfig {
    /// Working directory for every step unless the step overrides it.
    pub dir: String,
    /// Extra environment variables applied to every step.
    pub env: BTreeMap<String, String>,
    /// Commands to run, in order. Empty means "detect from the project".
    pub steps: Vec<DepsStepConfig>,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            dir: default_deps_dir(),
            env: BTreeMap::new(),
            steps: Vec::new(),
        }
    }
}

/// One dependency-update command.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DepsStepConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Overrides `deps.dir` for this step.
    pub dir: Option<String>,
    /// Merged over `deps.env` for this step.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// One configuration file as written. A key that is absent stays `None`,
/// so an explicit value (even `dir = "."` or `steps = []`) always wins
/// over a lower layer.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    #[serde(default)]
    deps: DepsLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct DepsLayer {
    dir: Option<String>,
    env: Option<BTreeMap<String, String>>,
    steps: Option<Vec<DepsStepConfig>>,
}

fn default_deps_dir() -> String {
    ".".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".devrun.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read. Otherwise the project file
/// is layered over the user file, and both over the defaults.
///
/// Relative directories in the explicit or project file are resolved against
/// the directory holding that file. Relative directories in the user file
/// stay relative to the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(DevrunError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            merge_layers(load_anchored_layer(path)?, None)
        }
        None => {
            let user_layer = load_user_config()?;
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let project_layer = match find_project_config_path(&cwd) {
                Some(path) => {
                    info!("Loading project configuration from: {}", path.display());
                    Some(load_anchored_layer(&path)?)
                }
                None => {
                    debug!("No project configuration file ({}) found.", PROJECT_CONFIG_FILENAME);
                    None
                }
            };
            merge_layers(user_layer.unwrap_or_default(), project_layer)
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "Devrun", "devrun") else {
        warn!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        let mut layer = load_layer(&config_path)?;
        expand_layer_paths(&mut layer, None);
        Ok(Some(layer))
    } else {
        debug!("User configuration file not found at {}", config_path.display());
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for
/// `.devrun.toml`. Stops (without a result) at the first directory that
/// contains `.git`, unless that directory holds the config itself.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!("Found .git at {}, stopping project config search.", path.display());
            return None;
        }
        path = path.parent()?;
    }
}

fn load_layer(path: &Path) -> Result<ConfigLayer> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Loads `path` and resolves its relative directories against its parent.
fn load_anchored_layer(path: &Path) -> Result<ConfigLayer> {
    let mut layer = load_layer(path)?;
    let base = path.parent().filter(|p| !p.as_os_str().is_empty());
    expand_layer_paths(&mut layer, base);
    Ok(layer)
}

/// Field by field, a value written in `upper` replaces the one in `lower`.
fn merge_layers(lower: ConfigLayer, upper: Option<ConfigLayer>) -> Config {
    let upper = upper.unwrap_or_default().deps;
    let lower = lower.deps;
    Config {
        deps: DepsConfig {
            dir: upper.dir.or(lower.dir).unwrap_or_else(default_deps_dir),
            env: upper.env.or(lower.env).unwrap_or_default(),
            steps: upper.steps.or(lower.steps).unwrap_or_default(),
        },
    }
}

/// Expands `~` in every directory of `layer`, then joins relative results
/// onto `base` when one is given.
fn expand_layer_paths(layer: &mut ConfigLayer, base: Option<&Path>) {
    if let Some(dir) = layer.deps.dir.as_mut() {
        *dir = resolve_dir(dir, base);
        debug!("Expanded deps directory: {}", dir);
    }
    for step in layer.deps.steps.iter_mut().flatten() {
        if let Some(dir) = step.dir.as_mut() {
            *dir = resolve_dir(dir, base);
        }
    }
}

fn resolve_dir(dir: &str, base: Option<&Path>) -> String {
    // Empty values are left for validation to reject.
    if dir.trim().is_empty() {
        return dir.to_string();
    }
    let expanded = shellexpand::tilde(dir).into_owned();
    match base {
        Some(base) if Path::new(&expanded).is_relative() => {
            if expanded == "." {
                base.to_string_lossy().into_owned()
            } else {
                base.join(&expanded).to_string_lossy().into_owned()
            }
        }
        _ => expanded,
    }
}

/// Checks an environment variable name accepted from config or the CLI.
pub fn validate_env_key(key: &str) -> std::result::Result<(), String> {
    if key.is_empty() {
        return Err("environment variable name cannot be empty".to_string());
    }
    if key.contains('=') || key.contains('\0') {
        return Err(format!("invalid environment variable name '{}'", key));
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    let deps = &config.deps;
    if deps.dir.trim().is_empty() {
        return Err(anyhow!(DevrunError::Config(
            "deps.dir cannot be empty".to_string()
        )));
    }
    for key in deps.env.keys() {
        validate_env_key(key).map_err(|e| anyhow!(DevrunError::Config(format!("deps.env: {}", e))))?;
    }
    for (index, step) in deps.steps.iter().enumerate() {
        if step.program.trim().is_empty() {
            return Err(anyhow!(DevrunError::Config(format!(
                "deps.steps[{}] has an empty program",
                index
            ))));
        }
        for key in step.env.keys() {
            validate_env_key(key).map_err(|e| {
                anyhow!(DevrunError::Config(format!("deps.steps[{}].env: {}", index, e)))
            })?;
        }
    }
    Ok(())
}
