//! Weight persistence helpers for `.wbin` archives.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use bincode::{deserialize, serialize};
use model_enc::Shape;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Weights;

/// Errors that may occur while reading or writing weight snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Raised when filesystem access fails.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Raised when encoding or decoding the snapshot payload fails.
    #[error("bincode error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    /// Raised when the stored matrix does not cover `rows * cols` cells.
    #[error("snapshot declares {shape} but stores {found} weights")]
    Corrupt { shape: Shape, found: usize },
    /// Raised when the stored shape differs from the configured one.
    #[error("snapshot is {found}, expected {expected}")]
    ShapeMismatch { expected: Shape, found: Shape },
}

/// Serializable representation of [`Weights`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeightSnapshot {
    shape: Shape,
    matrix: Vec<i64>,
    bias: i64,
}

impl WeightSnapshot {
    /// Captures weights in row-major order.
    pub fn capture(weights: &Weights) -> Self {
        Self {
            shape: weights.shape(),
            matrix: weights.matrix().iter().copied().collect(),
            bias: weights.bias(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Rebuilds the weights, validating the stored dimensions.
    pub fn to_weights(&self) -> Result<Weights, SnapshotError> {
        let corrupt = || SnapshotError::Corrupt {
            shape: self.shape,
            found: self.matrix.len(),
        };
        if self.matrix.len() != self.shape.len() {
            return Err(corrupt());
        }
        let matrix = Array2::from_shape_vec(self.shape.dim(), self.matrix.clone())
            .map_err(|_| corrupt())?;
        Ok(Weights::from_parts(matrix, self.bias))
    }

    /// Writes the snapshot, creating parent directories as needed.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serialize(self)?;
        let mut file = File::create(path)?;
        file.write_all(&payload)?;
        Ok(())
    }

    /// Reads a snapshot from the supplied path.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let mut bytes = Vec::new();
        File::open(path.as_ref())?.read_to_end(&mut bytes)?;
        let snapshot = deserialize(&bytes)?;
        Ok(snapshot)
    }

    /// Captures and writes the supplied weights.
    pub fn write_weights<P: AsRef<Path>>(path: P, weights: &Weights) -> Result<(), SnapshotError> {
        Self::capture(weights).write(path)
    }

    /// Loads weights of the expected shape, or zeros when no snapshot exists yet.
    pub fn load_or_zeroed<P: AsRef<Path>>(path: P, expected: Shape) -> Result<Weights, SnapshotError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Weights::zeros(expected));
        }
        let snapshot = Self::read(path)?;
        if snapshot.shape != expected {
            return Err(SnapshotError::ShapeMismatch {
                expected,
                found: snapshot.shape,
            });
        }
        snapshot.to_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn snapshot_round_trip_via_disk() {
        let weights = Weights::from_parts(array![[3, -1, 0], [-2, 5, 1]], -4);
        let file = NamedTempFile::new().unwrap();
        WeightSnapshot::write_weights(file.path(), &weights).unwrap();
        let restored = WeightSnapshot::read(file.path()).unwrap();
        assert_eq!(restored.shape(), Shape::new(2, 3));
        assert_eq!(restored.to_weights().unwrap(), weights);
    }

    #[test]
    fn missing_snapshot_loads_zeros() {
        let dir = tempdir().unwrap();
        let weights =
            WeightSnapshot::load_or_zeroed(dir.path().join("absent.wbin"), Shape::new(4, 4))
                .unwrap();
        assert!(weights.is_zero());
        assert_eq!(weights.shape(), Shape::new(4, 4));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/weights.wbin");
        WeightSnapshot::write_weights(&path, &Weights::zeros(Shape::new(2, 2))).unwrap();
        let err = WeightSnapshot::load_or_zeroed(&path, Shape::new(50, 50)).unwrap_err();
        assert!(matches!(err, SnapshotError::ShapeMismatch { .. }));
    }

    #[test]
    fn truncated_matrix_is_corrupt() {
        let snapshot = WeightSnapshot {
            shape: Shape::new(2, 2),
            matrix: vec![1, 2, 3],
            bias: 0,
        };
        assert!(matches!(
            snapshot.to_weights(),
            Err(SnapshotError::Corrupt { found: 3, .. })
        ));
    }
}
