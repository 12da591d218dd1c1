//! Decoded grayscale pixel grids handed over by the image codec.

use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building pixel or bipolar matrices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Rows of a nested vector did not share the same length.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell of a bipolar matrix held something other than -1 or +1.
    #[error("cell ({row}, {col}) holds {value}, expected -1 or +1")]
    NonBipolar { row: usize, col: usize, value: i8 },
}

/// Height and width of an image or weight grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells covered by the shape.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major grayscale intensities, typically in `0..=255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelMatrix {
    data: Array2<u8>,
}

impl PixelMatrix {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, EncodeError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(EncodeError::RaggedRows {
                row,
                expected: width,
                found: values.len(),
            });
        }
        let data = Array2::from_shape_fn((rows.len(), width), |(row, col)| rows[row][col]);
        Ok(Self { data })
    }

    /// Wraps a row-major buffer; returns `None` when its length disagrees with `shape`.
    pub fn from_raw(shape: Shape, buffer: Vec<u8>) -> Option<Self> {
        Array2::from_shape_vec(shape.dim(), buffer)
            .ok()
            .map(Self::new)
    }

    pub fn shape(&self) -> Shape {
        self.data.dim().into()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.data
    }
}
