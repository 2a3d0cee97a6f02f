//! Configuration for fxgen generators.
//!
//! Configuration lives in an `fxgen.toml` file found by walking up from the
//! directory of the sources being processed, mirroring how `lombok.config`
//! files apply to a directory tree.
//!
//! ```toml
//! [accessors]
//! prefix = ["m", "_"]
//! fluent = false
//!
//! [setter]
//! flag_usage = "warning"
//! final_parameters = false
//!
//! [generated]
//! lombok_generated = true
//! javax_generated = false
//!
//! [logging]
//! level = "debug"
//! json = false
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::prelude::*;

/// Environment variable that points at an explicit config file.
pub const FXGEN_CONFIG_ENV_VAR: &str = "FXGEN_CONFIG_PATH";

/// File name searched for by [`discover_config_path`].
pub const CONFIG_FILE_NAME: &str = "fxgen.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FxConfig {
    /// Accessor naming policy (`lombok.accessors.*`).
    #[serde(default)]
    pub accessors: AccessorsConfig,

    /// Options specific to generated setters.
    #[serde(default)]
    pub setter: SetterConfig,

    /// `@Generated` markers added to every generated member.
    #[serde(default)]
    pub generated: GeneratedConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessorsConfig {
    /// Field name prefixes stripped before deriving accessor names.
    ///
    /// When non-empty, fields matching none of the prefixes get no accessors.
    #[serde(default)]
    pub prefix: Vec<String>,

    /// Use the bare property name as the setter name (`name(String)` rather
    /// than `setName(String)`).
    #[serde(default)]
    pub fluent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagUsage {
    Warning,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetterConfig {
    /// Report every use of the setter annotation with this severity.
    #[serde(default)]
    pub flag_usage: Option<FlagUsage>,

    /// Declare the generated parameter `final`.
    #[serde(default)]
    pub final_parameters: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedConfig {
    /// Add `@lombok.Generated`.
    #[serde(default)]
    pub lombok_generated: bool,

    /// Add `@javax.annotation.Generated("lombok")`.
    #[serde(default)]
    pub javax_generated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Simple level (`info`, `debug`, ...) or an `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Append logs to the given file instead of stderr.
    ///
    /// If the file cannot be opened, logs go to stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// Create the effective `EnvFilter`, merging `RUST_LOG` when it is set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Keep the message without the source snippet.
        ConfigError::Toml(err.message().to_string())
    }
}

impl FxConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: FxConfig = toml::from_str(text)?;
        config.accessors.normalize();
        Ok(config)
    }
}

impl AccessorsConfig {
    fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.prefix.len());
        for prefix in self.prefix.drain(..) {
            if seen.contains(&prefix) {
                tracing::warn!(target: "fxgen.config", %prefix, "duplicate accessor prefix ignored");
                continue;
            }
            seen.push(prefix);
        }
        self.prefix = seen;
    }
}

/// Find the config file that applies to `start_dir`.
///
/// Search order:
/// 1) `FXGEN_CONFIG_PATH` (absolute or relative to `start_dir`)
/// 2) `fxgen.toml` in `start_dir` or the nearest ancestor that has one
pub fn discover_config_path(start_dir: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(FXGEN_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            start_dir.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the configuration that applies to `start_dir`.
///
/// If no config is present, returns [`FxConfig::default`] and `None`.
pub fn load_for_dir(start_dir: &Path) -> Result<(FxConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(start_dir) else {
        return Ok((FxConfig::default(), None));
    };

    let config = FxConfig::load_from_path(&path)?;
    tracing::debug!(target: "fxgen.config", path = %path.display(), "loaded config");
    Ok((config, Some(path)))
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init_tracing(logging: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = logging.env_filter();

        let file = logging.file.as_ref().and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        let file_failed = logging.file.is_some() && file.is_none();

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = match (file, logging.json)
        {
            (Some(file), true) => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .boxed(),
            (Some(file), false) => tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .boxed(),
            (None, true) => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
            (None, false) => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed(),
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() && file_failed {
            if let Some(path) = logging.file.as_ref() {
                tracing::warn!(
                    target: "fxgen.config",
                    path = %path.display(),
                    "failed to open log file; logging to stderr"
                );
            }
        }
    });
}
