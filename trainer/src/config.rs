use model_enc::{BipolarEncoder, Shape};
use serde::Deserialize;

/// Configuration for the Hebbian trainer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HebbianTrainerConfig {
    pub rows: usize,
    pub cols: usize,
    /// Grayscale value treated as empty canvas.
    pub background: u8,
}

impl HebbianTrainerConfig {
    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn encoder(&self) -> BipolarEncoder {
        BipolarEncoder::new(self.background)
    }
}

impl Default for HebbianTrainerConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            background: 255,
        }
    }
}
