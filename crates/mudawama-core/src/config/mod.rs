use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{MudawamaError, Result};
use crate::milestone::DEFAULT_THRESHOLDS;

/// Largest UTC offset in use anywhere is UTC+14.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MudawamaConfig {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub milestones: MilestoneConfig,
    #[serde(default)]
    pub time: TimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotConfig {
    /// Path to the snapshot JSON handed over by the persistence layer.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneConfig {
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<u64>,
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
        }
    }
}

fn default_thresholds() -> Vec<u64> {
    DEFAULT_THRESHOLDS.to_vec()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimeConfig {
    /// Offset from UTC, in minutes, used to resolve local calendar days.
    /// 0 means UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Path of the global config file: `<config_dir>/mudawama/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mudawama").join("config.toml"))
}

impl MudawamaConfig {
    /// Load config, layering global, project, and local files (later
    /// layers win). Missing files are fine; defaults fill the gaps.
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".mudawama").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".mudawama").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| MudawamaError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| MudawamaError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Lenient validation: clamp out-of-range values and warn rather than
    /// reject.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.milestones.thresholds.is_empty() {
            warnings.push("milestones.thresholds is empty; using defaults".to_string());
            self.milestones.thresholds = default_thresholds();
        }

        if self.time.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            warnings.push(format!(
                "time.utc_offset_minutes {} out of range; clamping",
                self.time.utc_offset_minutes
            ));
            self.time.utc_offset_minutes = self
                .time
                .utc_offset_minutes
                .clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES);
        }

        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        warnings
    }

    /// Serialize to TOML, for writing starter config files.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MudawamaError::Config(e.to_string()))
    }
}
