//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.notecommander/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading and resolution run before the file logger exists, so nothing here
//! logs. Where the config came from (`ConfigSource`) and any values that were
//! rejected (`ResolvedConfig::warnings`) are returned for the caller to report.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub input_capacity: Option<usize>,
    pub input_rows: Option<usize>,
    pub poll_interval_ms: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_INPUT_CAPACITY: usize = 65556;
pub const DEFAULT_INPUT_ROWS: usize = 1;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 16;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

const APP_DIR: &str = ".notecommander";
const DEFAULT_DB_FILE: &str = "notes.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub db_path: PathBuf,
    pub input_capacity: usize,
    pub input_rows: usize,
    pub poll_interval: Duration,
    pub log_level: LevelFilter,
    /// Config values that were rejected in favour of a default.
    pub warnings: Vec<String>,
}

/// Where the file-level settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed; a commented-out default was written here.
    Generated(PathBuf),
    /// Built-in defaults, with the reason no file was used.
    Defaults(String),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded config from {}", path.display()),
            ConfigSource::Generated(path) => write!(
                f,
                "no config file found, generated default at {}",
                path.display()
            ),
            ConfigSource::Defaults(reason) => write!(f, "using default config ({reason})"),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.notecommander/`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR))
}

/// Returns the path to `~/.notecommander/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.notecommander/config.toml`.
pub fn load_config() -> Result<(NotesConfig, ConfigSource), ConfigError> {
    match config_path() {
        Some(path) => load_config_at(&path),
        None => Ok((
            NotesConfig::default(),
            ConfigSource::Defaults("could not determine home directory".to_string()),
        )),
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NotesConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_at(path: &Path) -> Result<(NotesConfig, ConfigSource), ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::Defaults(format!("failed to write default config: {e}")),
        };
        return Ok((NotesConfig::default(), source));
    }

    let config = load_config_from(path)?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<NotesConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# NoteCommander Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# input_capacity = 65556      # Bytes the input line can hold, plus one
# input_rows = 1              # Rows reserved below the status bar
# poll_interval_ms = 16       # Sleep between key polls when idle
# log_level = "debug"         # "off", "error", "warn", "info", "debug", "trace"

# [store]
# path = "~/.notecommander/notes.json"   # Or set NOTECOMMANDER_DB env var
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_db` is the `--db` flag (None = not specified).
pub fn resolve(config: &NotesConfig, cli_db: Option<&Path>) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Store path: CLI → env → config → default
    let db_path = cli_db
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("NOTECOMMANDER_DB").ok().map(PathBuf::from))
        .or_else(|| config.store.path.as_deref().map(expand_home))
        .unwrap_or_else(default_db_path);

    let input_capacity = match config.general.input_capacity {
        Some(0) => {
            warnings.push(format!(
                "input_capacity must be positive, using {DEFAULT_INPUT_CAPACITY}"
            ));
            DEFAULT_INPUT_CAPACITY
        }
        Some(n) => n,
        None => DEFAULT_INPUT_CAPACITY,
    };

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warnings.push(format!(
                "Unknown log_level {level:?}, using {DEFAULT_LOG_LEVEL}"
            ));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        db_path,
        input_capacity,
        input_rows: config
            .general
            .input_rows
            .unwrap_or(DEFAULT_INPUT_ROWS)
            .max(1),
        poll_interval: Duration::from_millis(
            config
                .general
                .poll_interval_ms
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        ),
        log_level,
        warnings,
    }
}

fn default_db_path() -> PathBuf {
    app_dir()
        .map(|d| d.join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
