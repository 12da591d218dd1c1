//! Overall and per-class accuracy statistics.

use model_dec::Label;
use serde::Deserialize;

use crate::percentage::Percentage;
use crate::record::{EvaluationRecord, FailedExample};

/// Known class sizes overriding the counts observed in the records.
///
/// Only the totals and percentage denominators change; correct and incorrect
/// counts still come from the records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ClassTotals {
    pub rectangle: usize,
    pub triangle: usize,
}

impl ClassTotals {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Rectangle => self.rectangle,
            Label::Triangle => self.triangle,
        }
    }
}

/// One line of the statistics table.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsRow {
    /// `"Overall"` or the class name.
    pub name: String,
    pub total: usize,
    pub incorrect: usize,
    pub correct: usize,
    pub incorrect_pct: Percentage,
    pub correct_pct: Percentage,
}

impl StatsRow {
    fn new(name: impl Into<String>, total: usize, correct: usize, incorrect: usize) -> Self {
        Self {
            name: name.into(),
            total,
            incorrect,
            correct,
            incorrect_pct: Percentage::of(incorrect, total),
            correct_pct: Percentage::of(correct, total),
        }
    }
}

/// Aggregated result of an evaluation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationReport {
    overall: StatsRow,
    classes: Vec<StatsRow>,
    records: Vec<EvaluationRecord>,
    failures: Vec<FailedExample>,
}

impl EvaluationReport {
    /// Aggregates records using the class counts they contain.
    pub fn from_records(records: Vec<EvaluationRecord>) -> Self {
        Self::build(records, Vec::new(), None)
    }

    /// Aggregates records, keeping failures for display and honouring optional
    /// class totals.
    pub fn build(
        records: Vec<EvaluationRecord>,
        failures: Vec<FailedExample>,
        totals: Option<ClassTotals>,
    ) -> Self {
        let correct = records.iter().filter(|r| r.is_correct()).count();
        let overall = StatsRow::new("Overall", records.len(), correct, records.len() - correct);

        let classes = Label::ALL
            .iter()
            .map(|&label| {
                let of_class = records.iter().filter(|r| r.actual == label);
                let observed = of_class.clone().count();
                let correct = of_class.filter(|r| r.is_correct()).count();
                let total = totals.map(|t| t.get(label)).unwrap_or(observed);
                StatsRow::new(label.name(), total, correct, observed - correct)
            })
            .collect();

        Self {
            overall,
            classes,
            records,
            failures,
        }
    }

    pub fn overall(&self) -> &StatsRow {
        &self.overall
    }

    /// Row for `label`.
    pub fn class(&self, label: Label) -> &StatsRow {
        let index = Label::ALL
            .iter()
            .position(|l| *l == label)
            .unwrap_or_default();
        &self.classes[index]
    }

    /// Overall row first, then rectangle and triangle.
    pub fn rows(&self) -> impl Iterator<Item = &StatsRow> {
        std::iter::once(&self.overall).chain(self.classes.iter())
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn correct(&self) -> impl Iterator<Item = &EvaluationRecord> {
        self.records.iter().filter(|r| r.is_correct())
    }

    pub fn incorrect(&self) -> impl Iterator<Item = &EvaluationRecord> {
        self.records.iter().filter(|r| !r.is_correct())
    }

    pub fn failures(&self) -> &[FailedExample] {
        &self.failures
    }

    /// Overall accuracy in `[0, 1]`, `None` when nothing was evaluated.
    pub fn accuracy(&self) -> Option<f64> {
        self.overall.correct_pct.value().map(|pct| pct / 100.0)
    }
}
