use std::collections::BTreeSet;
use std::env;
use std::fmt;

/// Selects which of the two historical scoring scales the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringScale {
    /// Rank-weighted sum with a linear workload penalty subtracted.
    Subtractive,
    /// Normalized 0-100 coverage/proficiency blend with a workload multiplier.
    Multiplicative,
}

impl ScoringScale {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "subtractive" => Ok(Self::Subtractive),
            "multiplicative" => Ok(Self::Multiplicative),
            other => Err(ConfigError::InvalidScoringScale {
                value: other.to_string(),
            }),
        }
    }
}

/// Process-wide knobs consumed by the scorer, composer, and guard.
///
/// Passed in at construction; never read from ambient state per request.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Project statuses that make an assignment count toward workload.
    pub active_statuses: BTreeSet<String>,
    /// Hard cap on concurrent active assignments per person.
    pub max_active_assignments: u32,
    /// Score subtracted per active assignment on the subtractive scale.
    pub penalty_per_active: f64,
    pub scoring_scale: ScoringScale,
    /// Upper bound of the proficiency recording scale ("higher is better").
    pub proficiency_max: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            active_statuses: ["Not Started", "In Progress"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            max_active_assignments: 3,
            penalty_per_active: 10.0,
            scoring_scale: ScoringScale::Subtractive,
            proficiency_max: 10,
        }
    }
}

/// Top-level configuration for the engine and its telemetry.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = EngineConfig::default();

        let active_statuses = match env::var("ACTIVE_STATUSES") {
            Ok(raw) => raw
                .split(',')
                .map(|status| status.trim().to_string())
                .filter(|status| !status.is_empty())
                .collect(),
            Err(_) => defaults.active_statuses,
        };

        let max_active_assignments = env::var("MAX_ACTIVE_ASSIGNMENTS")
            .unwrap_or_else(|_| defaults.max_active_assignments.to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidCap)?;

        let penalty_per_active = env::var("PENALTY_PER_ACTIVE")
            .unwrap_or_else(|_| defaults.penalty_per_active.to_string())
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidPenalty)?;

        let scoring_scale = match env::var("SCORING_SCALE") {
            Ok(raw) => ScoringScale::from_str(&raw)?,
            Err(_) => defaults.scoring_scale,
        };

        let proficiency_max = env::var("PROFICIENCY_MAX")
            .unwrap_or_else(|_| defaults.proficiency_max.to_string())
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidProficiencyMax)?;
        if proficiency_max == 0 {
            return Err(ConfigError::InvalidProficiencyMax);
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            engine: EngineConfig {
                active_statuses,
                max_active_assignments,
                penalty_per_active,
                scoring_scale,
                proficiency_max,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCap,
    InvalidPenalty,
    InvalidProficiencyMax,
    InvalidScoringScale { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCap => {
                write!(f, "MAX_ACTIVE_ASSIGNMENTS must be a non-negative integer")
            }
            ConfigError::InvalidPenalty => write!(f, "PENALTY_PER_ACTIVE must be a number"),
            ConfigError::InvalidProficiencyMax => {
                write!(f, "PROFICIENCY_MAX must be a positive integer")
            }
            ConfigError::InvalidScoringScale { value } => {
                write!(
                    f,
                    "SCORING_SCALE must be 'subtractive' or 'multiplicative', got '{}'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
