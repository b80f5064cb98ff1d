//! Configuration for the startup seed and the interactive shell.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags / environment variables (BOOKDESK_CONFIG, BOOKDESK_NO_SEED)
//! 2. Config file (.bookdesk/config.yaml)
//! 3. Defaults (the standard demo seed)
//!
//! Config file discovery:
//! - An explicit path wins if given
//! - Otherwise searches the current directory and parents for .bookdesk/config.yaml
//! - Finally falls back to ~/.bookdesk/config.yaml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::Seed;

const CONFIG_DIR: &str = ".bookdesk";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Replaces the standard seed entirely when present
    #[serde(default)]
    pub seed: Option<Seed>,
    #[serde(default)]
    pub shell: Option<ShellConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShellConfig {
    pub prompt: Option<String>,
    /// Print the numbered menu before every prompt
    #[serde(alias = "banner")]
    pub show_menu: Option<bool>,
}

/// Inputs that override file-based configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// Start with an empty library regardless of the configured seed
    pub no_seed: bool,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Records to load before the first command
    pub seed: Seed,
    /// Shell behaviour
    pub shell: ShellSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    pub prompt: String,
    pub show_menu: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: "Enter your choice: ".to_string(),
            show_menu: true,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            seed: Seed::standard(),
            shell: ShellSettings::default(),
            config_file: None,
        }
    }
}

/// Find config file by searching `start` and its parents, then the home directory
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file over the defaults
fn apply_file(mut resolved: ResolvedConfig, file: ConfigFile) -> ResolvedConfig {
    if let Some(seed) = file.seed {
        resolved.seed = seed;
    }

    if let Some(shell) = file.shell {
        if let Some(prompt) = shell.prompt {
            resolved.shell.prompt = prompt;
        }
        if let Some(show_menu) = shell.show_menu {
            resolved.shell.show_menu = show_menu;
        }
    }

    resolved
}

/// Load configuration from all sources, searching from `cwd` for a config file
pub fn resolve_from(options: &ConfigOptions, cwd: &Path) -> Result<ResolvedConfig> {
    let config_file = match &options.config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        }
        None => find_config_file(cwd),
    };

    let mut resolved = ResolvedConfig::default();

    if let Some(ref path) = config_file {
        info!(path = %path.display(), "Loading config file");
        resolved = apply_file(resolved, load_config_file(path)?);
        resolved.config_file = Some(path.clone());
    } else {
        debug!("No config file found, using defaults");
    }

    if options.no_seed {
        debug!("Seeding disabled");
        resolved.seed = Seed::empty();
    }

    resolved
        .seed
        .validate()
        .with_context(|| match &resolved.config_file {
            Some(path) => format!("Invalid seed in {}", path.display()),
            None => "Invalid seed".to_string(),
        })?;

    Ok(resolved)
}

/// Load configuration from all sources, searching from the current directory
pub fn resolve(options: &ConfigOptions) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve_from(options, &cwd)
}
