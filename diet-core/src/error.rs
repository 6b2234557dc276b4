use thiserror::Error;

/// Errors produced by the nutrition engine.
///
/// Every variant describes invalid input; the engine never fails for any
/// other reason. Callers turn these into validation messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid body metrics: {0}")]
    InvalidMetrics(String),

    #[error("invalid calorie target: {0}")]
    InvalidTarget(String),

    #[error("invalid plan input: {0}")]
    InvalidPlanInput(String),

    #[error("invalid daily targets: {0}")]
    InvalidTargets(String),

    #[error("invalid log entry {name:?}: {reason}")]
    InvalidLogEntry { name: String, reason: String },

    #[error("unrecognized {kind}: {value:?}")]
    UnrecognizedEnum { kind: &'static str, value: String },

    #[error("target weight is too low (BMI {bmi:.1}); it should be at least {min_kg:.1} kg")]
    UnsafeTargetWeight { bmi: f64, min_kg: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Returns `value` if it is finite and strictly positive.
pub(crate) fn positive(value: f64, what: &str) -> std::result::Result<f64, String> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{what} must be a positive number, got {value}"))
    }
}

/// Returns `value` if it is finite and zero or more.
pub(crate) fn non_negative(value: f64, what: &str) -> std::result::Result<f64, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{what} must be zero or a positive number, got {value}"))
    }
}
