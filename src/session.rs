//! Detector session mirroring the train, test, predict and clear actions.

use anyhow::{Context, Result, anyhow};
use core_weights::{WeightStore, WeightStats, Weights};
use datasets::{DatasetDescriptor, ExampleFile, GrayscaleDecoder, PixelSource};
use evalbench::{ClassTotals, EvaluationRecord, EvaluationReport, FailedExample};
use model_dec::Label;
use tracing::{info, instrument, warn};
use trainer::{ClassTrainSummary, HebbianTrainer, HebbianTrainerConfig, Sample};

use crate::layout::DatasetLayout;

/// Result of a full training pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainReport {
    /// Class batches in the order they were applied.
    pub classes: Vec<ClassTrainSummary>,
    pub stats: WeightStats,
}

impl TrainReport {
    pub fn applied(&self) -> usize {
        self.classes.iter().map(|c| c.applied).sum()
    }
}

/// Owns the weight store and runs the detector's operations against it.
pub struct ShapeDetector<S = GrayscaleDecoder> {
    store: WeightStore,
    trainer: HebbianTrainer,
    source: S,
}

impl ShapeDetector<GrayscaleDecoder> {
    /// Detector with zeroed weights decoding images from disk.
    pub fn new(config: HebbianTrainerConfig) -> Self {
        Self::with_source(config, GrayscaleDecoder)
    }
}

impl<S: PixelSource> ShapeDetector<S> {
    pub fn with_source(config: HebbianTrainerConfig, source: S) -> Self {
        Self {
            store: WeightStore::new(config.shape()),
            trainer: HebbianTrainer::new(config),
            source,
        }
    }

    /// Installs previously trained weights, which must match the configured shape.
    pub fn load_weights(&self, weights: Weights) -> Result<()> {
        self.store
            .replace(weights)
            .context("trained weights do not fit the configured image shape")
    }

    pub fn store(&self) -> &WeightStore {
        &self.store
    }

    pub fn weights(&self) -> std::sync::Arc<Weights> {
        self.store.snapshot()
    }

    /// Trains triangles (desired output -1) and then rectangles (+1).
    ///
    /// Each class is one atomic batch; if the rectangle batch is rejected the
    /// triangle batch stays installed.
    #[instrument(skip(self, layout))]
    pub fn train(&self, layout: &DatasetLayout) -> Result<TrainReport> {
        let mut classes = Vec::with_capacity(2);
        for dataset in [layout.triangles(), layout.rectangles()] {
            classes.push(self.train_dataset(&dataset)?);
        }
        let stats = self.store.snapshot().stats();
        info!(bias = stats.bias, "training complete");
        Ok(TrainReport { classes, stats })
    }

    /// Trains one single-class dataset.
    pub fn train_dataset(&self, dataset: &DatasetDescriptor) -> Result<ClassTrainSummary> {
        let label = dataset
            .label
            .ok_or_else(|| anyhow!("dataset `{}` has no class to train", dataset.name))?;
        let files = dataset
            .files()
            .with_context(|| format!("failed to list dataset `{}`", dataset.name))?;
        info!(dataset = %dataset.name, files = files.len(), %label, "training class");

        let samples = files.into_iter().map(|file| match self.source.load(&file.path) {
            Ok(pixels) => Sample::decoded(file.name, pixels),
            Err(err) => Sample::failed(file.name, err),
        });
        self.trainer
            .train_class(&self.store, label, samples)
            .with_context(|| format!("training on `{}` aborted", dataset.name))
    }

    /// Scores the rectangle and triangle folders against their known labels.
    pub fn test(&self, layout: &DatasetLayout) -> Result<EvaluationReport> {
        self.evaluate(&[layout.rectangles(), layout.triangles()], None)
    }

    /// Scores the mixed folder, labelling examples from their file names.
    pub fn predict(
        &self,
        layout: &DatasetLayout,
        totals: Option<ClassTotals>,
    ) -> Result<EvaluationReport> {
        self.evaluate(&[layout.mixed()], totals)
    }

    /// Classifies every file of `datasets` against one consistent weight snapshot.
    ///
    /// Failures of individual examples are collected and reported instead of
    /// aborting the pass.
    #[instrument(skip_all, fields(datasets = datasets.len()))]
    pub fn evaluate(
        &self,
        datasets: &[DatasetDescriptor],
        totals: Option<ClassTotals>,
    ) -> Result<EvaluationReport> {
        let weights = self.store.snapshot();
        let mut records = Vec::new();
        let mut failures = Vec::new();

        for dataset in datasets {
            let resolver = dataset.resolver();
            let files = dataset
                .files()
                .with_context(|| format!("failed to list dataset `{}`", dataset.name))?;
            for file in files {
                let outcome = resolver
                    .resolve(&file)
                    .map_err(anyhow::Error::from)
                    .and_then(|actual| self.classify(&weights, &file, actual));
                match outcome {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        warn!(name = %file.name, error = %err, "example not classified");
                        failures.push(FailedExample::new(file.name, format!("{err:#}")));
                    }
                }
            }
        }

        let report = EvaluationReport::build(records, failures, totals);
        info!(
            total = report.overall().total,
            correct = report.overall().correct,
            failed = report.failures().len(),
            "evaluation complete"
        );
        Ok(report)
    }

    /// Resets the matrix and bias to zero.
    pub fn clear(&self) {
        self.store.reset();
        info!("weights cleared");
    }

    fn classify(
        &self,
        weights: &Weights,
        file: &ExampleFile,
        actual: Label,
    ) -> Result<EvaluationRecord> {
        let pixels = self.source.load(&file.path)?;
        let prediction = self.trainer.predict(weights, &pixels)?;
        Ok(EvaluationRecord::new(
            file.name.clone(),
            prediction.score,
            prediction.label,
            actual,
        ))
    }
}
