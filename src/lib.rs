//! Hebbian rectangle/triangle detector.
//!
//! Images are encoded into bipolar matrices, folded into a single weight
//! matrix plus bias by the Hebbian rule, and classified by the sign of a
//! linear score. [`ShapeDetector`] drives the train, test, predict and clear
//! operations over a folder layout.

pub mod layout;
pub mod session;

pub use core_weights::{WeightSnapshot, WeightStore, Weights};
pub use evalbench::{ClassTotals, EvaluationRecord, EvaluationReport};
pub use layout::DatasetLayout;
pub use model_dec::Label;
pub use session::{ShapeDetector, TrainReport};
pub use trainer::HebbianTrainerConfig;
