//! Shared weight state with snapshot reads and whole-value swaps.

use std::sync::Arc;

use model_enc::Shape;
use parking_lot::RwLock;
use thiserror::Error;

use crate::Weights;

/// Errors raised by [`WeightStore`] mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightStoreError {
    /// Replacement weights do not have the store's configured shape.
    #[error("weight store is {expected}, replacement is {found}")]
    ShapeMismatch { expected: Shape, found: Shape },
}

/// Owner of the current [`Weights`].
///
/// Readers take an `Arc` snapshot and keep a consistent view even while a
/// training batch runs. Writers hold the lock for the whole batch, so readers
/// arriving mid-batch wait for the swap instead of seeing a partial update.
#[derive(Debug)]
pub struct WeightStore {
    shape: Shape,
    state: RwLock<Arc<Weights>>,
}

impl WeightStore {
    /// Store initialised with zero weights.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            state: RwLock::new(Arc::new(Weights::zeros(shape))),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Current weights and bias as one consistent value.
    pub fn snapshot(&self) -> Arc<Weights> {
        self.state.read().clone()
    }

    /// Swaps in new weights after checking their shape.
    pub fn replace(&self, weights: Weights) -> Result<(), WeightStoreError> {
        self.check_shape(&weights)?;
        *self.state.write() = Arc::new(weights);
        Ok(())
    }

    /// Zeroes the matrix and the bias in a single swap.
    pub fn reset(&self) {
        *self.state.write() = Arc::new(Weights::zeros(self.shape));
    }

    /// Runs `step` against the current weights while holding the write lock and
    /// installs its result only when it succeeds.
    pub fn try_update<F, E>(&self, step: F) -> Result<Arc<Weights>, E>
    where
        F: FnOnce(&Weights) -> Result<Weights, E>,
        E: From<WeightStoreError>,
    {
        let mut guard = self.state.write();
        let current: &Weights = &guard;
        let next = step(current)?;
        self.check_shape(&next)?;
        let next = Arc::new(next);
        *guard = Arc::clone(&next);
        Ok(next)
    }

    fn check_shape(&self, weights: &Weights) -> Result<(), WeightStoreError> {
        if weights.shape() == self.shape {
            Ok(())
        } else {
            Err(WeightStoreError::ShapeMismatch {
                expected: self.shape,
                found: weights.shape(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn replace_rejects_other_shapes() {
        let store = WeightStore::new(Shape::new(2, 2));
        let err = store.replace(Weights::zeros(Shape::new(3, 3))).unwrap_err();
        assert_eq!(
            err,
            WeightStoreError::ShapeMismatch {
                expected: Shape::new(2, 2),
                found: Shape::new(3, 3)
            }
        );
        assert!(store.snapshot().is_zero());
    }

    #[test]
    fn reset_clears_matrix_and_bias() {
        let store = WeightStore::new(Shape::new(2, 2));
        store
            .replace(Weights::from_parts(array![[1, -1], [-1, 1]], 1))
            .unwrap();
        store.reset();
        let weights = store.snapshot();
        assert!(weights.is_zero());
        assert_eq!(weights.shape(), Shape::new(2, 2));
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let store = WeightStore::new(Shape::new(1, 2));
        let before = store.snapshot();
        let result: Result<_, WeightStoreError> = store.try_update(|_| {
            Err(WeightStoreError::ShapeMismatch {
                expected: Shape::new(1, 2),
                found: Shape::new(2, 1),
            })
        });
        assert!(result.is_err());
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn snapshot_survives_later_swaps() {
        let store = WeightStore::new(Shape::new(1, 1));
        let old = store.snapshot();
        store
            .replace(Weights::from_parts(array![[4]], 2))
            .unwrap();
        assert!(old.is_zero());
        assert_eq!(store.snapshot().bias(), 2);
    }
}
