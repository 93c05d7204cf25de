//! On-disk configuration. A YAML file merged over built-in defaults, then
//! overridden by command line flags; the result is resolved into
//! [`Settings`] once at startup.

use crate::{
    content::Language,
    effects::{
        chars,
        scramble::{RevealDirection, ScrambleError, ScrambleSpec},
    },
};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_SPEED_MS: u64 = 50;
const DEFAULT_MAX_ITERATIONS: u32 = 10;
const DEFAULT_VIEWPORT_THRESHOLD: f32 = 0.1;
/// Hover scrambles tick faster than the slow decrypt reveals.
const CIPHER_SPEED_MS: u64 = 30;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading configuration: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("merging configuration: {0}")]
    Merge(String),

    #[error("invalid effect tuning: {0}")]
    Effects(#[from] ScrambleError),
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) language: Option<Language>,
    pub(crate) skip_boot: Option<bool>,
    pub(crate) effects: EffectsConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EffectsConfig {
    pub(crate) speed_ms: Option<u64>,
    pub(crate) max_iterations: Option<u32>,
    pub(crate) viewport_threshold: Option<f32>,
    pub(crate) pool: Option<String>,
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Merge `other` over `self`, with `other`'s set fields winning.
    pub(crate) fn merged(&self, other: &Config) -> Result<Config, ConfigError> {
        merge_struct::merge(self, other).map_err(|e| ConfigError::Merge(e.to_string()))
    }

    pub(crate) fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "rogueverge")?;
        Some(dirs.config_dir().join("config.yaml"))
    }
}

/// Effect tuning and interface defaults after every layer is applied.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) language: Language,
    pub(crate) skip_boot: bool,
    pub(crate) speed: Duration,
    pub(crate) max_iterations: u32,
    pub(crate) viewport_threshold: f32,
    pub(crate) pool: Option<String>,
}

impl Settings {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            language: config.language.unwrap_or_default(),
            skip_boot: config.skip_boot.unwrap_or(false),
            speed: Duration::from_millis(config.effects.speed_ms.unwrap_or(DEFAULT_SPEED_MS)),
            max_iterations: config.effects.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            viewport_threshold: config
                .effects
                .viewport_threshold
                .unwrap_or(DEFAULT_VIEWPORT_THRESHOLD),
            pool: config.effects.pool.clone(),
        }
    }

    /// Surface bad tuning at startup instead of at the first trigger.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.decrypt_spec("probe").validate()?;
        Ok(())
    }

    /// The slow reveal used by viewport and manual decrypt texts.
    pub(crate) fn decrypt_spec(&self, target: &str) -> ScrambleSpec {
        let spec = ScrambleSpec::new(target).speed(self.speed).burst(self.max_iterations);
        match &self.pool {
            Some(pool) => spec.pool(pool),
            None => spec,
        }
    }

    /// A sequential variant of the decrypt reveal.
    pub(crate) fn decrypt_sequential_spec(
        &self,
        target: &str,
        direction: RevealDirection,
    ) -> ScrambleSpec {
        let spec = ScrambleSpec::new(target).speed(self.speed).sequential(direction);
        match &self.pool {
            Some(pool) => spec.pool(pool),
            None => spec,
        }
    }

    /// The fast hover scramble used by navigation labels and calls to
    /// action. Always runs on its fixed cadence and cipher glyphs.
    pub(crate) fn cipher_spec(&self, target: &str) -> ScrambleSpec {
        ScrambleSpec::new(target)
            .speed(Duration::from_millis(CIPHER_SPEED_MS))
            .sequential(RevealDirection::Start)
            .pool(chars::CIPHER_CHARS)
    }
}
