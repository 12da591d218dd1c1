use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use evalbench::ClassTotals;
use hebb_shapes::DatasetLayout;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use trainer::HebbianTrainerConfig;

fn default_weights() -> PathBuf {
    PathBuf::from("weights/hebb.wbin")
}

/// Settings driving the `train` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TrainSettings {
    /// Weight snapshot extended by training and written back afterwards.
    #[serde(default = "default_weights")]
    pub weights: PathBuf,
    /// Dataset folders.
    #[serde(default)]
    pub datasets: DatasetLayout,
    /// Image shape and background intensity.
    #[serde(default)]
    pub model: HebbianTrainerConfig,
    /// Optional location for a plain-text training summary.
    #[serde(default = "TrainSettings::default_summary")]
    pub summary: Option<PathBuf>,
    /// Optional flamegraph destination collected while training.
    #[serde(default)]
    pub profile_output: Option<PathBuf>,
}

impl TrainSettings {
    fn default_summary() -> Option<PathBuf> {
        Some(PathBuf::from("reports/train_summary.txt"))
    }
}

impl Default for TrainSettings {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            datasets: DatasetLayout::default(),
            model: HebbianTrainerConfig::default(),
            summary: Self::default_summary(),
            profile_output: None,
        }
    }
}

/// Settings powering the `test` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TestSettings {
    #[serde(default = "default_weights")]
    pub weights: PathBuf,
    #[serde(default)]
    pub datasets: DatasetLayout,
    #[serde(default)]
    pub model: HebbianTrainerConfig,
    /// Path where the evaluation report is written.
    #[serde(default = "TestSettings::default_report")]
    pub report: PathBuf,
    #[serde(default)]
    pub profile_output: Option<PathBuf>,
}

impl TestSettings {
    fn default_report() -> PathBuf {
        PathBuf::from("reports/test_report.txt")
    }
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            datasets: DatasetLayout::default(),
            model: HebbianTrainerConfig::default(),
            report: Self::default_report(),
            profile_output: None,
        }
    }
}

/// Settings consumed by the `predict` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PredictSettings {
    #[serde(default = "default_weights")]
    pub weights: PathBuf,
    #[serde(default)]
    pub datasets: DatasetLayout,
    #[serde(default)]
    pub model: HebbianTrainerConfig,
    /// Known class sizes of the mixed folder, used as percentage denominators.
    #[serde(default)]
    pub expected_totals: Option<ClassTotals>,
    #[serde(default = "PredictSettings::default_report")]
    pub report: PathBuf,
    #[serde(default)]
    pub profile_output: Option<PathBuf>,
}

impl PredictSettings {
    fn default_report() -> PathBuf {
        PathBuf::from("reports/predict_report.txt")
    }
}

impl Default for PredictSettings {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            datasets: DatasetLayout::default(),
            model: HebbianTrainerConfig::default(),
            expected_totals: None,
            report: Self::default_report(),
            profile_output: None,
        }
    }
}

/// Settings shared by `clear` and `show`, which only touch the weight snapshot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WeightSettings {
    #[serde(default = "default_weights")]
    pub weights: PathBuf,
    #[serde(default)]
    pub model: HebbianTrainerConfig,
}

impl Default for WeightSettings {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            model: HebbianTrainerConfig::default(),
        }
    }
}

/// Reads `<command>.toml`, or the explicit path, into the command's settings.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load_settings<T>(command: &str, explicit: Option<PathBuf>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let required = explicit.is_some();
    let path = explicit.unwrap_or_else(|| PathBuf::from(format!("{command}.toml")));
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound && !required => return Ok(T::default()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            bail!("no `{command}` settings at {}", path.display())
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("cannot read `{command}` settings from {}", path.display()));
        }
    };
    toml::from_str(&raw)
        .with_context(|| format!("invalid `{command}` settings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn load_settings_returns_default_when_missing() {
        let settings: TrainSettings = load_settings("train", None).expect("default settings");
        assert_eq!(settings, TrainSettings::default());
        assert_eq!(settings.model.shape().dim(), (50, 50));
        assert_eq!(settings.datasets.triangles, PathBuf::from("shapes/triangles"));
    }

    #[test]
    fn load_settings_errors_for_missing_explicit_path() {
        let result: Result<TestSettings> =
            load_settings("test", Some(PathBuf::from("definitely_missing.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_settings_parses_toml_payload() {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.into_temp_path();
        std::fs::write(
            &path,
            r#"weights = "ckpts/demo.wbin"
report = "out/predict.txt"

[datasets]
mixed = "data/unseen"

[model]
rows = 32
cols = 24

[expected_totals]
rectangle = 91
triangle = 109
"#,
        )
        .expect("write config");

        let settings: PredictSettings =
            load_settings("predict", Some(path.to_path_buf())).expect("parsed settings");
        assert_eq!(settings.weights, PathBuf::from("ckpts/demo.wbin"));
        assert_eq!(settings.report, PathBuf::from("out/predict.txt"));
        assert_eq!(settings.datasets.mixed, PathBuf::from("data/unseen"));
        assert_eq!(settings.datasets.rectangles, PathBuf::from("shapes/rectangles"));
        assert_eq!(settings.model.rows, 32);
        assert_eq!(settings.model.cols, 24);
        assert_eq!(settings.model.background, 255);
        assert_eq!(
            settings.expected_totals,
            Some(ClassTotals {
                rectangle: 91,
                triangle: 109
            })
        );
        assert_eq!(settings.profile_output, None);
    }
}
