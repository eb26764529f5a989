use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::FilterParams;
use crate::data::loader::Source;
use crate::data::model::Sex;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "NAME_TRENDS_CONFIG";

// ---------------------------------------------------------------------------
// Start-up configuration
// ---------------------------------------------------------------------------

/// Example file:
///
/// ```json
/// {
///   "source": { "kind": "directory", "path": "names", "extension": "txt" },
///   "default_sex": "F",
///   "default_range": [0, 5000],
///   "default_name": "Olivia"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: Source,
    pub default_sex: Sex,
    pub default_range: (u64, u64),
    pub default_name: String,
    /// Rows shown in the "first few rows" previews.
    pub head_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: Source::default(),
            default_sex: Sex::Male,
            default_range: (100, 1000),
            default_name: "Emma".to_string(),
            head_rows: 5,
        }
    }
}

impl AppConfig {
    /// Defaults, then the file named by [`CONFIG_ENV`], then the first
    /// positional argument as the source path.
    pub fn resolve() -> Result<Self> {
        let config_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let source_arg = std::env::args_os().nth(1).map(PathBuf::from);
        Self::resolve_from(config_file.as_deref(), source_arg)
    }

    pub fn resolve_from(config_file: Option<&Path>, source_arg: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = source_arg {
            config.source = Source::from_path(path);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Initial sidebar selection, with the range clamped to `max_births`.
    pub fn initial_params(&self, max_births: u64) -> FilterParams {
        let (lo, hi) = self.default_range;
        let hi = hi.min(max_births);
        FilterParams {
            sex: self.default_sex,
            min_births: lo.min(hi),
            max_births: hi,
            name: self.default_name.clone(),
        }
    }
}
