use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use core_weights::WeightSnapshot;
use evalbench::{EvaluationReport, render_report};
use hebb_shapes::{ShapeDetector, TrainReport};
use pprof::ProfilerGuard;
use tracing::{info, warn};
use trainer::HebbianTrainerConfig;

use crate::config::{PredictSettings, TestSettings, TrainSettings, WeightSettings};
use crate::telemetry::{init_telemetry, write_flamegraph};

pub fn run_train(config_path: Option<PathBuf>) -> Result<()> {
    let settings = crate::config::load_settings::<TrainSettings>("train", config_path)?;
    let profiler_guard = init_telemetry(settings.profile_output.is_some());
    info!(?settings.model, "trainer configuration");

    let detector = open_detector(&settings.model, &settings.weights)?;
    let report = detector.train(&settings.datasets)?;
    let summary = render_train_summary(&report);
    println!("Training summary:\n{summary}");

    WeightSnapshot::write_weights(&settings.weights, &detector.weights()).with_context(|| {
        format!("failed to write weights to {}", settings.weights.display())
    })?;
    println!("Weights written to {}", settings.weights.display());

    if let Some(path) = &settings.summary {
        write_text_file(path, &format!("# Hebbian training summary\n{summary}"))?;
        println!("Training summary written to {}", path.display());
    }

    finish_profile(profiler_guard, settings.profile_output.as_deref())
}

pub fn run_test(config_path: Option<PathBuf>) -> Result<()> {
    let settings = crate::config::load_settings::<TestSettings>("test", config_path)?;
    let profiler_guard = init_telemetry(settings.profile_output.is_some());

    let detector = open_detector(&settings.model, &settings.weights)?;
    let report = detector.test(&settings.datasets)?;
    publish_report("Test", &report, &settings.report)?;

    finish_profile(profiler_guard, settings.profile_output.as_deref())
}

pub fn run_predict(config_path: Option<PathBuf>) -> Result<()> {
    let settings = crate::config::load_settings::<PredictSettings>("predict", config_path)?;
    let profiler_guard = init_telemetry(settings.profile_output.is_some());

    let detector = open_detector(&settings.model, &settings.weights)?;
    let report = detector.predict(&settings.datasets, settings.expected_totals)?;
    publish_report("Prediction", &report, &settings.report)?;

    finish_profile(profiler_guard, settings.profile_output.as_deref())
}

pub fn run_clear(config_path: Option<PathBuf>) -> Result<()> {
    let settings = crate::config::load_settings::<WeightSettings>("clear", config_path)?;
    let _ = init_telemetry(false);

    let detector = ShapeDetector::new(settings.model.clone());
    detector.clear();
    WeightSnapshot::write_weights(&settings.weights, &detector.weights()).with_context(|| {
        format!("failed to write weights to {}", settings.weights.display())
    })?;
    println!(
        "Weights and bias reset to zero in {}",
        settings.weights.display()
    );
    Ok(())
}

pub fn run_show(config_path: Option<PathBuf>) -> Result<()> {
    let settings = crate::config::load_settings::<WeightSettings>("show", config_path)?;
    let _ = init_telemetry(false);

    let detector = open_detector(&settings.model, &settings.weights)?;
    let stats = detector.weights().stats();
    println!("Weights: {}", settings.weights.display());
    println!("shape = {}", stats.shape);
    println!("bias = {}", stats.bias);
    println!("min = {}", stats.min);
    println!("max = {}", stats.max);
    println!("positive cells = {}", stats.positive);
    println!("negative cells = {}", stats.negative);
    Ok(())
}

/// Builds a detector seeded with the snapshot at `weights`, or zeros if absent.
fn open_detector(model: &HebbianTrainerConfig, weights: &Path) -> Result<ShapeDetector> {
    let detector = ShapeDetector::new(model.clone());
    if !weights.exists() {
        warn!(path = %weights.display(), "no weight snapshot found, starting from zero weights");
        return Ok(detector);
    }
    let loaded = WeightSnapshot::load_or_zeroed(weights, model.shape())
        .with_context(|| format!("failed to load weights from {}", weights.display()))?;
    detector.load_weights(loaded)?;
    info!(path = %weights.display(), "weights loaded");
    Ok(detector)
}

fn publish_report(title: &str, report: &EvaluationReport, path: &Path) -> Result<()> {
    let text = render_report(report);
    println!("{title} results:\n{text}");
    write_text_file(path, &format!("# {title} results\n{text}"))?;
    println!("{title} report written to {}", path.display());
    Ok(())
}

fn render_train_summary(report: &TrainReport) -> String {
    let mut lines = Vec::new();
    for class in &report.classes {
        lines.push(format!(
            "{} (desired output {:+}): applied = {}, skipped = {}",
            class.label,
            class.label.bipolar(),
            class.applied,
            class.skipped.len()
        ));
        for skipped in &class.skipped {
            lines.push(format!("  skipped {}: {}", skipped.name, skipped.reason));
        }
    }
    lines.push(format!("bias = {}", report.stats.bias));
    lines.push(format!(
        "weights: min = {}, max = {}, positive = {}, negative = {}",
        report.stats.min, report.stats.max, report.stats.positive, report.stats.negative
    ));
    lines.join("\n")
}

fn finish_profile(guard: Option<ProfilerGuard<'static>>, output: Option<&Path>) -> Result<()> {
    if let (Some(guard), Some(path)) = (guard, output) {
        create_parent_dirs(path)?;
        write_flamegraph(guard, path)?;
        println!("CPU profile written to {}", path.display());
    }
    Ok(())
}

/// Writes a report body terminated by exactly one newline.
fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    create_parent_dirs(path)?;
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "{}", contents.trim_end_matches('\n'))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display())),
        _ => Ok(()),
    }
}
