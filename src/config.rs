//! Engine configuration.
//!
//! Every threshold the engine uses is a field here rather than a module-level
//! constant. `EngineConfig::default()` yields the documented defaults; a TOML
//! document may override any subset of fields.
//!
//! ```
//! use u_workload::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     [balancer]
//!     max_iterations = 3
//!     "#,
//! ).unwrap();
//! assert_eq!(config.balancer.max_iterations, 3);
//! assert!((config.bands.high - 80.0).abs() < 1e-10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::LoadStatus;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub bands: LoadBands,
    #[serde(default)]
    pub system_bands: SystemBands,
    #[serde(default)]
    pub capacity: CapacityDefaults,
    #[serde(default)]
    pub balancer: BalancerConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

/// Load-percent cutoffs for the per-resource status bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBands {
    /// Loads above this (and up to `overload`) are `High`.
    #[serde(default = "default_high")]
    pub high: f64,
    /// Loads above this are `Overload`.
    #[serde(default = "default_overload")]
    pub overload: f64,
    /// Loads below this are `Underutilized`.
    #[serde(default = "default_underutilized")]
    pub underutilized: f64,
}

/// Resource fractions that classify a day at system level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemBands {
    #[serde(default = "default_overload_fraction")]
    pub overload_fraction: f64,
    /// Applies to high + overloaded resources together.
    #[serde(default = "default_high_fraction")]
    pub high_fraction: f64,
    #[serde(default = "default_underutilized_fraction")]
    pub underutilized_fraction: f64,
}

/// Fallbacks for unspecified capacity and effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityDefaults {
    /// Hours per working day.
    #[serde(default = "default_hours")]
    pub default_daily_capacity: f64,
    /// Hours assumed for a task without effort or duration.
    #[serde(default = "default_hours")]
    pub default_task_effort: f64,
}

/// Redistribution balancer tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancerConfig {
    /// Overloaded when load exceeds `avg * overload_multiplier`.
    #[serde(default = "default_overload_multiplier")]
    pub overload_multiplier: f64,
    /// Underutilized when load is below `avg * underload_multiplier`.
    #[serde(default = "default_underload_multiplier")]
    pub underload_multiplier: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// Move recommendation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Daily load percent above which a resource is overloaded.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// A resource is a move target when its average load is below
    /// `threshold * underutilized_ratio`.
    #[serde(default = "default_underutilized_ratio")]
    pub underutilized_ratio: f64,
}

impl EngineConfig {
    /// Parses a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Sets the balancer iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.balancer.max_iterations = max_iterations;
        self
    }

    /// Sets the default recommendation threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.recommendations.threshold = threshold;
        self
    }
}

impl LoadBands {
    /// Classifies a load percentage.
    ///
    /// The `Normal` band is closed on both ends: exactly `underutilized`
    /// and exactly `high` are both `Normal`.
    pub fn classify(&self, load: f64) -> LoadStatus {
        if load > self.overload {
            LoadStatus::Overload
        } else if load > self.high {
            LoadStatus::High
        } else if load >= self.underutilized {
            LoadStatus::Normal
        } else {
            LoadStatus::Underutilized
        }
    }
}

impl Default for LoadBands {
    fn default() -> Self {
        Self {
            high: default_high(),
            overload: default_overload(),
            underutilized: default_underutilized(),
        }
    }
}

impl Default for SystemBands {
    fn default() -> Self {
        Self {
            overload_fraction: default_overload_fraction(),
            high_fraction: default_high_fraction(),
            underutilized_fraction: default_underutilized_fraction(),
        }
    }
}

impl Default for CapacityDefaults {
    fn default() -> Self {
        Self {
            default_daily_capacity: default_hours(),
            default_task_effort: default_hours(),
        }
    }
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            overload_multiplier: default_overload_multiplier(),
            underload_multiplier: default_underload_multiplier(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            underutilized_ratio: default_underutilized_ratio(),
        }
    }
}

fn default_high() -> f64 {
    80.0
}

fn default_overload() -> f64 {
    100.0
}

fn default_underutilized() -> f64 {
    30.0
}

fn default_overload_fraction() -> f64 {
    0.3
}

fn default_high_fraction() -> f64 {
    0.5
}

fn default_underutilized_fraction() -> f64 {
    0.5
}

fn default_hours() -> f64 {
    8.0
}

fn default_overload_multiplier() -> f64 {
    1.2
}

fn default_underload_multiplier() -> f64 {
    0.8
}

fn default_max_iterations() -> usize {
    10
}

fn default_threshold() -> f64 {
    80.0
}

fn default_underutilized_ratio() -> f64 {
    0.5
}
