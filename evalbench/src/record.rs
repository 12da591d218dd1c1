use model_dec::Label;

/// Outcome of classifying one test image.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationRecord {
    /// File name or other identifier of the example.
    pub name: String,
    pub score: f64,
    pub predicted: Label,
    pub actual: Label,
}

impl EvaluationRecord {
    pub fn new(name: impl Into<String>, score: f64, predicted: Label, actual: Label) -> Self {
        Self {
            name: name.into(),
            score,
            predicted,
            actual,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }

    /// Bipolar form of the prediction.
    pub fn decision(&self) -> i64 {
        self.predicted.bipolar()
    }
}

/// Example that could not be classified and is excluded from the statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedExample {
    pub name: String,
    pub reason: String,
}

impl FailedExample {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
