//! Hebbian training over labelled image batches and single-image inference.

pub mod config;
pub mod hebbian;
pub mod sample;

pub use config::HebbianTrainerConfig;
pub use hebbian::{ClassTrainSummary, HebbianTrainer, Prediction, TrainError};
pub use sample::{Sample, SkippedSample};
