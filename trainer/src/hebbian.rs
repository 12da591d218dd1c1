use core_rules::{RuleError, accumulate, score};
use core_weights::{WeightStore, WeightStoreError, Weights};
use model_dec::{BipolarDecoder, Label, decide};
use model_enc::{BipolarEncoder, PixelMatrix};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::HebbianTrainerConfig;
use crate::sample::{Sample, SkippedSample};

/// Failures that abort a whole training batch.
#[derive(Debug, Error)]
pub enum TrainError {
    /// An example violated the rule contract; nothing from the batch was kept.
    #[error("example `{name}` rejected: {source}")]
    Rejected {
        name: String,
        #[source]
        source: RuleError,
    },
    #[error(transparent)]
    Store(#[from] WeightStoreError),
}

/// Outcome of training one class folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTrainSummary {
    pub label: Label,
    pub applied: usize,
    pub skipped: Vec<SkippedSample>,
    /// Bias weight after the batch was installed.
    pub bias: i64,
}

/// Output of the linear model for one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    pub score: f64,
    /// Bipolar decision, `+1` or `-1`.
    pub decision: i8,
    pub label: Label,
}

/// Encodes images and folds them into a [`WeightStore`].
pub struct HebbianTrainer {
    encoder: BipolarEncoder,
    decoder: BipolarDecoder,
}

impl HebbianTrainer {
    pub fn new(config: HebbianTrainerConfig) -> Self {
        Self {
            encoder: config.encoder(),
            decoder: BipolarDecoder::new(),
        }
    }

    /// Trains every sample of one class with the class's desired output.
    ///
    /// Samples that failed to decode are skipped. A rule violation aborts the
    /// batch and the store keeps its pre-batch weights.
    #[instrument(skip(self, store, samples), fields(label = %label))]
    pub fn train_class<I>(
        &self,
        store: &WeightStore,
        label: Label,
        samples: I,
    ) -> Result<ClassTrainSummary, TrainError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let desired_output = label.bipolar();
        let mut applied = 0usize;
        let mut skipped = Vec::new();

        let installed = store.try_update(|current| {
            let mut next = current.clone();
            for sample in samples {
                let pixels = match sample.pixels {
                    Ok(pixels) => pixels,
                    Err(err) => {
                        warn!(name = %sample.name, error = %err, "skipping undecodable example");
                        skipped.push(SkippedSample {
                            name: sample.name,
                            reason: format!("{err:#}"),
                        });
                        continue;
                    }
                };
                let image = self.encoder.encode(&pixels);
                accumulate(&mut next, &image, desired_output).map_err(|source| {
                    TrainError::Rejected {
                        name: sample.name.clone(),
                        source,
                    }
                })?;
                applied += 1;
                debug!(name = %sample.name, "example applied");
            }
            Ok::<_, TrainError>(next)
        })?;

        info!(
            applied,
            skipped = skipped.len(),
            bias = installed.bias(),
            "class batch installed"
        );
        Ok(ClassTrainSummary {
            label,
            applied,
            skipped,
            bias: installed.bias(),
        })
    }

    /// Scores decoded pixels against `weights` and applies the decision rule.
    pub fn predict(&self, weights: &Weights, pixels: &PixelMatrix) -> Result<Prediction, RuleError> {
        let image = self.encoder.encode(pixels);
        let score = score(&image, weights)?;
        let decision = decide(score);
        Ok(Prediction {
            score,
            decision,
            label: self.decoder.decode(score),
        })
    }
}
