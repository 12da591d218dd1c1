//! Linear scoring of an encoded image against the current weights.

use core_weights::Weights;
use model_enc::ImageMatrix;
use crate::{RuleError, ensure_same_shape};

/// Elementwise product sum of image and weight matrix.
///
/// Rows and columns are checked independently, so non-square shapes are
/// supported and any mismatch fails instead of reading out of range.
pub fn dot(image: &ImageMatrix, weights: &Weights) -> Result<i64, RuleError> {
    ensure_same_shape(weights.shape(), image.shape())?;
    image
        .as_array()
        .iter()
        .zip(weights.matrix().iter())
        .try_fold(0i64, |total, (&x, &w)| {
            i64::from(x)
                .checked_mul(w)
                .and_then(|product| total.checked_add(product))
        })
        .ok_or(RuleError::Overflow)
}

/// Score of `image`: [`dot`] plus the bias weight.
pub fn score(image: &ImageMatrix, weights: &Weights) -> Result<f64, RuleError> {
    let total = dot(image, weights)?
        .checked_add(weights.bias())
        .ok_or(RuleError::Overflow)?;
    Ok(total as f64)
}
