//! Hebbian learning rule and the linear scorer used at inference time.

pub mod hebbian;
pub mod scorer;

use model_enc::Shape;
use thiserror::Error;

pub use hebbian::{accumulate, train_one, validate_desired_output};
pub use scorer::{dot, score};

/// Contract violations raised by the learning and scoring rules.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// Image and weight matrix dimensions differ.
    #[error("image is {found}, weights are {expected}")]
    ShapeMismatch { expected: Shape, found: Shape },
    /// Desired output was not exactly +1 or -1.
    #[error("desired output must be +1 or -1, got {0}")]
    InvalidDesiredOutput(i64),
    /// A weight, the bias or a score left the `i64` range.
    #[error("weight arithmetic overflowed i64")]
    Overflow,
}

pub(crate) fn ensure_same_shape(weights: Shape, image: Shape) -> Result<(), RuleError> {
    if weights == image {
        Ok(())
    } else {
        Err(RuleError::ShapeMismatch {
            expected: weights,
            found: image,
        })
    }
}
