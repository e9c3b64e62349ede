//! Optional TOML configuration file
use crate::color::{Color, ParseColorError};
use crate::highlight::{RangeList, MAX_RANGES};
use crate::params::{ParamError, ParamStore, SetOutcome};
use crate::raster::FontPaths;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Contents of `config.toml`.  Every field is optional.
///
/// ```toml
/// year = 2025
/// month = 10
///
/// [params]
/// card-w = 480
/// card-bg = "#fdf6e3"
/// week-start = "monday"
///
/// [[ranges]]
/// start = 3
/// end = 9
/// color = "#ffd6a5"
///
/// [fonts]
/// default = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub params: BTreeMap<String, toml::Value>,
    pub ranges: Vec<RangeConfig>,
    pub fonts: FontPaths,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub start: i32,
    pub end: i32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl Config {
    /// `$XDG_CONFIG_HOME/calcard/config.toml` (or the platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("calcard").join("config.toml"))
    }

    /// Reads the configuration from `path` if given, otherwise from
    /// [`Config::default_path`].  A missing explicit file is an error; a
    /// missing default file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::from_file(p),
            None => match Config::default_path() {
                Some(p) if p.is_file() => Config::from_file(&p),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Config::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(s: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(s)
    }

    /// Stores every `[params]` entry.  Numbers and strings are accepted;
    /// values that cannot be interpreted are skipped with a warning.
    pub fn apply_params(&self, store: &mut ParamStore) -> Result<(), ConfigError> {
        for (name, value) in &self.params {
            let outcome = match value {
                toml::Value::Integer(i) => {
                    #[allow(clippy::cast_precision_loss)]
                    let n = *i as f64;
                    store.set_number(name, n)?
                }
                toml::Value::Float(f) => store.set_number(name, *f)?,
                toml::Value::String(s) => store.set(name, s)?,
                other => {
                    return Err(ConfigError::Value {
                        name: name.clone(),
                        value: other.to_string(),
                    })
                }
            };
            if outcome == SetOutcome::Ignored {
                warn!(name, value = %value, "ignoring uninterpretable parameter value");
            }
        }
        Ok(())
    }

    /// Builds the highlight ranges.  With no `[[ranges]]` the usual single
    /// `[1, 1]` range is returned; entries past the limit are dropped.
    pub fn range_list(&self) -> Result<RangeList, ConfigError> {
        let mut list = RangeList::new();
        if self.ranges.len() > MAX_RANGES {
            warn!(
                count = self.ranges.len(),
                "too many ranges in configuration; ignoring the extras"
            );
        }
        for (i, rc) in self.ranges.iter().take(MAX_RANGES).enumerate() {
            let pos = if i == 0 {
                0
            } else {
                list.add().map_err(|_| ConfigError::TooManyRanges)?
            };
            let color = rc.color.as_deref().map(str::parse::<Color>).transpose()?;
            if let Some(spec) = list.get_mut(pos) {
                spec.start = rc.start;
                spec.end = rc.end;
                spec.enabled = rc.enabled;
                if let Some(c) = color {
                    spec.color = c;
                }
            }
        }
        Ok(list)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Param(#[from] ParamError),
    #[error("invalid value for parameter {name}: {value}")]
    Value { name: String, value: String },
    #[error("invalid range color: {0}")]
    Color(#[from] ParseColorError),
    #[error("too many ranges")]
    TooManyRanges,
}
