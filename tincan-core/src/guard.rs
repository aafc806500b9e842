//! Precondition checks run at the top of every statement builder.
//!
//! Builders call these before touching the queue, so a rejected payload
//! never produces a partial batch.

use crate::error::PreconditionError;

/// Require a payload to be present.
pub fn require_object<T>(value: Option<T>, message: &str) -> Result<T, PreconditionError> {
    value.ok_or_else(|| PreconditionError::new(message))
}

/// Require a finite number.
pub fn require_number(value: Option<f64>, message: &str) -> Result<f64, PreconditionError> {
    match value {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(PreconditionError::new(message)),
    }
}
