// Configuration loading and parsing (league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// The full contents of league.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub league: LeagueConfig,
    pub prizes: PrizeConfig,
    #[serde(default)]
    pub lottery: LotteryConfig,
    #[serde(default)]
    pub mock_draft: MockDraftConfig,
    pub data_paths: DataPaths,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
}

/// Season money figures that decide how many teams finish in the money.
#[derive(Debug, Clone, Deserialize)]
pub struct PrizeConfig {
    pub total_prize_pool: f64,
    pub total_collected: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LotteryConfig {
    /// Fixed seed for a reproducible draw. Omit for a fresh draw each run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Monte Carlo trials for the odds-by-pick table; 0 skips it.
    #[serde(default = "default_simulations")]
    pub simulations: usize,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        LotteryConfig {
            seed: None,
            simulations: default_simulations(),
        }
    }
}

fn default_simulations() -> usize {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockDraftConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MockDraftConfig {
    fn default() -> Self {
        MockDraftConfig { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub standings: String,
    pub prospects: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Where the binary writes its log. Stdout is reserved for the report.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: default_log_dir(),
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

impl LoggingConfig {
    /// Log file location, with a relative `dir` resolved against `base_dir`.
    pub fn log_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.dir).join(&self.file)
    }
}

fn default_log_dir() -> String {
    "logs".into()
}

fn default_log_file() -> String {
    "draft-lottery.log".into()
}

fn default_log_filter() -> String {
    "draft_lottery=info,warn".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/league.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join(LEAGUE_FILE);
    let text = read_file(&league_path)?;
    let config = parse_config(&text, &league_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// File name of the league settings, under both `defaults/` and `config/`.
pub const LEAGUE_FILE: &str = "league.toml";

/// Seed `config/league.toml` from `defaults/league.toml` on first run.
///
/// Returns the path written, or `None` when the league file already exists
/// (an edited copy is never replaced).
pub fn ensure_league_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(LEAGUE_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(LEAGUE_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {} in config/ or defaults/ under {}",
                LEAGUE_FILE,
                base_dir.display()
            ),
        });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(Some(target))
}

/// Load config relative to the current working directory, seeding the
/// league file from defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_league_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".into(),
            message: "must not be empty".into(),
        });
    }

    let money_fields: &[(&str, f64)] = &[
        ("prizes.total_prize_pool", config.prizes.total_prize_pool),
        ("prizes.total_collected", config.prizes.total_collected),
    ];
    for (name, val) in money_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a non-negative amount, got {val}"),
            });
        }
    }

    let path_fields: &[(&str, &str)] = &[
        ("data_paths.standings", config.data_paths.standings.as_str()),
        ("data_paths.prospects", config.data_paths.prospects.as_str()),
        ("logging.dir", config.logging.dir.as_str()),
        ("logging.file", config.logging.file.as_str()),
    ];
    for (name, val) in path_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
