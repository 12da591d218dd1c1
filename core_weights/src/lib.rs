//! Weight matrix, bias and the shared store the trainer swaps them into.

pub mod io;
pub mod store;

use model_enc::Shape;
use ndarray::Array2;

pub use io::{SnapshotError, WeightSnapshot};
pub use store::{WeightStore, WeightStoreError};

/// Hebbian weight matrix together with its bias weight.
///
/// The two values are only ever replaced together so a reader never pairs a
/// fresh matrix with a stale bias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weights {
    matrix: Array2<i64>,
    bias: i64,
}

impl Weights {
    /// Zero matrix of the requested shape with zero bias.
    pub fn zeros(shape: Shape) -> Self {
        Self {
            matrix: Array2::zeros(shape.dim()),
            bias: 0,
        }
    }

    pub fn from_parts(matrix: Array2<i64>, bias: i64) -> Self {
        Self { matrix, bias }
    }

    /// Mutable access for learning rules folding examples into an owned copy.
    pub fn parts_mut(&mut self) -> (&mut Array2<i64>, &mut i64) {
        (&mut self.matrix, &mut self.bias)
    }

    pub fn shape(&self) -> Shape {
        self.matrix.dim().into()
    }

    pub fn matrix(&self) -> &Array2<i64> {
        &self.matrix
    }

    pub fn bias(&self) -> i64 {
        self.bias
    }

    /// True when every weight and the bias are zero.
    pub fn is_zero(&self) -> bool {
        self.bias == 0 && self.matrix.iter().all(|w| *w == 0)
    }

    /// Summary figures used by reports.
    pub fn stats(&self) -> WeightStats {
        let mut stats = WeightStats {
            shape: self.shape(),
            bias: self.bias,
            min: 0,
            max: 0,
            positive: 0,
            negative: 0,
        };
        let mut values = self.matrix.iter().copied();
        if let Some(first) = values.next() {
            stats.min = first;
            stats.max = first;
            stats.count(first);
        }
        for value in values {
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            stats.count(value);
        }
        stats
    }
}

/// Aggregate view of a weight matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightStats {
    pub shape: Shape,
    pub bias: i64,
    pub min: i64,
    pub max: i64,
    /// Cells favouring rectangles.
    pub positive: usize,
    /// Cells favouring triangles.
    pub negative: usize,
}

impl WeightStats {
    fn count(&mut self, value: i64) {
        if value > 0 {
            self.positive += 1;
        } else if value < 0 {
            self.negative += 1;
        }
    }
}
