// Single source of truth for all default values.

// --- Forecast ---
pub const DEFAULT_RADIUS_KM: f64 = 250.0;
pub const DEFAULT_TIME_WINDOWS_DAYS: [f64; 3] = [1.0, 7.0, 30.0];
pub const DEFAULT_MAGNITUDE_THRESHOLDS: [f64; 4] = [5.0, 5.5, 6.0, 6.5];

// --- Regional calibration ---
pub const REGIONAL_ALPHA: f64 = 0.9;
pub const REGIONAL_PRODUCTIVITY_REFERENCE_MAGNITUDE: f64 = 6.0;
pub const REGIONAL_COMPLETENESS_MAGNITUDE: f64 = 4.5;

// --- b-value estimation ---
pub const DEFAULT_B_VALUE: f64 = 1.0;
pub const DEFAULT_B_MIN_EVENTS: usize = 30;

// --- Omori fit ---
pub const DEFAULT_OMORI_MIN_EVENTS: usize = 20;
pub const DEFAULT_HISTOGRAM_DAYS: usize = 30;
pub const DEFAULT_FIT_MAX_ITERATIONS: usize = 200;
pub const DEFAULT_K_BOUNDS: [f64; 2] = [0.05, 10.0];
pub const DEFAULT_C_BOUNDS: [f64; 2] = [0.01, 5.0];
pub const DEFAULT_P_BOUNDS: [f64; 2] = [0.8, 1.6];
pub const DEFAULT_FALLBACK_K: f64 = 0.3;
pub const DEFAULT_FALLBACK_C: f64 = 0.3;
pub const DEFAULT_FALLBACK_P: f64 = 1.1;

// --- Validation ---
pub const DEFAULT_MAINSHOCK_COUNT: usize = 20;
pub const DEFAULT_TARGET_MAGNITUDE: f64 = 5.0;
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;
pub const DEFAULT_PARALLEL: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "aftershock=info";
pub const LOG_ENV_VAR: &str = "AFTERSHOCK_LOG";
