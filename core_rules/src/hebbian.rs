//! Outer-product style weight accumulation.
//!
//! Each step adds `image * desired_output` to the matrix and `desired_output`
//! to the bias. There is no learning rate and no normalisation, so the result
//! of a batch is the plain sum of its examples in any order.

use core_weights::Weights;
use model_enc::ImageMatrix;
use ndarray::Zip;

use crate::{RuleError, ensure_same_shape};

/// Rejects anything other than the bipolar targets `+1` and `-1`.
pub fn validate_desired_output(desired_output: i64) -> Result<i64, RuleError> {
    match desired_output {
        1 | -1 => Ok(desired_output),
        other => Err(RuleError::InvalidDesiredOutput(other)),
    }
}

/// Applies one training example to `weights` in place.
///
/// Both contracts and the `i64` range are checked before anything is
/// written, so on error the weights are untouched.
pub fn accumulate(
    weights: &mut Weights,
    image: &ImageMatrix,
    desired_output: i64,
) -> Result<(), RuleError> {
    let desired_output = validate_desired_output(desired_output)?;
    ensure_same_shape(weights.shape(), image.shape())?;

    let next_bias = weights
        .bias()
        .checked_add(desired_output)
        .ok_or(RuleError::Overflow)?;
    let overflows = weights
        .matrix()
        .iter()
        .zip(image.as_array().iter())
        .any(|(&w, &x)| w.checked_add(i64::from(x) * desired_output).is_none());
    if overflows {
        return Err(RuleError::Overflow);
    }

    let (matrix, bias) = weights.parts_mut();
    Zip::from(matrix)
        .and(image.as_array())
        .for_each(|w, &x| *w += i64::from(x) * desired_output);
    *bias = next_bias;
    Ok(())
}

/// Pure form of [`accumulate`] returning the updated weights.
pub fn train_one(
    image: &ImageMatrix,
    desired_output: i64,
    weights: &Weights,
) -> Result<Weights, RuleError> {
    let mut next = weights.clone();
    accumulate(&mut next, image, desired_output)?;
    Ok(next)
}
