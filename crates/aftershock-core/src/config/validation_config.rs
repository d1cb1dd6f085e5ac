use serde::{Deserialize, Serialize};

use super::defaults;

/// Where the back-test takes each mainshock's Omori/b-value parameters from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterMode {
    /// Use the supplied forecast parameters for every mainshock.
    #[default]
    Fixed,
    /// Estimate b (Aki) and fit Omori per mainshock from its region.
    RegionalFit,
}

/// `[validation]` section: back-test selection and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Number of largest events scored as mainshocks.
    pub mainshock_count: usize,
    pub time_windows_days: Vec<f64>,
    /// Aftershocks at or above this magnitude count as occurred.
    pub target_magnitude: f64,
    /// Probability at or above which occurrence is predicted.
    pub decision_threshold: f64,
    /// Evaluate mainshocks on the rayon pool.
    pub parallel: bool,
    pub parameter_mode: ParameterMode,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mainshock_count: defaults::DEFAULT_MAINSHOCK_COUNT,
            time_windows_days: defaults::DEFAULT_TIME_WINDOWS_DAYS.to_vec(),
            target_magnitude: defaults::DEFAULT_TARGET_MAGNITUDE,
            decision_threshold: defaults::DEFAULT_DECISION_THRESHOLD,
            parallel: defaults::DEFAULT_PARALLEL,
            parameter_mode: ParameterMode::default(),
        }
    }
}
