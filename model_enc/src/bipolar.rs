//! Conversion of grayscale pixels into {-1, +1} matrices.

use ndarray::Array2;

use crate::pixels::{EncodeError, PixelMatrix, Shape};

/// Intensity treated as empty canvas.
pub const WHITE: u8 = 255;

/// Immutable grid of bipolar values produced once per source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageMatrix {
    cells: Array2<i8>,
}

impl ImageMatrix {
    /// Validates that every cell is exactly -1 or +1.
    pub fn from_bipolar(cells: Array2<i8>) -> Result<Self, EncodeError> {
        if let Some(((row, col), &value)) = cells
            .indexed_iter()
            .find(|(_, value)| **value != 1 && **value != -1)
        {
            return Err(EncodeError::NonBipolar { row, col, value });
        }
        Ok(Self { cells })
    }

    /// Builds a matrix from nested rows of bipolar values.
    pub fn from_rows(rows: &[&[i8]]) -> Result<Self, EncodeError> {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(EncodeError::RaggedRows {
                row,
                expected: width,
                found: values.len(),
            });
        }
        let cells = Array2::from_shape_fn((rows.len(), width), |(row, col)| rows[row][col]);
        Self::from_bipolar(cells)
    }

    /// Matrix filled with a single bipolar value.
    pub fn filled(shape: Shape, positive: bool) -> Self {
        let value = if positive { 1 } else { -1 };
        Self {
            cells: Array2::from_elem(shape.dim(), value),
        }
    }

    pub fn shape(&self) -> Shape {
        self.cells.dim().into()
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<i8> {
        self.cells.get((row, col)).copied()
    }

    pub fn as_array(&self) -> &Array2<i8> {
        &self.cells
    }
}

/// Maps the background intensity to -1 and everything else to +1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BipolarEncoder {
    background: u8,
}

impl BipolarEncoder {
    pub fn new(background: u8) -> Self {
        Self { background }
    }

    /// Encodes the pixel grid without resizing or cropping.
    pub fn encode(&self, pixels: &PixelMatrix) -> ImageMatrix {
        let cells = pixels
            .as_array()
            .mapv(|pixel| if pixel == self.background { -1 } else { 1 });
        ImageMatrix { cells }
    }
}

impl Default for BipolarEncoder {
    fn default() -> Self {
        Self::new(WHITE)
    }
}
