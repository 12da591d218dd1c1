//! Plain-text rendering of evaluation reports.

use std::fmt::Write;

use crate::record::EvaluationRecord;
use crate::report::EvaluationReport;

const STATS_HEADER: [&str; 6] = ["Shape", "Total Count", "❌ Count", "✅ Count", "❌ %", "✅ %"];
const LISTING_HEADER: [&str; 4] = ["File", "Output from Net", "Result", "Shape"];

/// Statistics table: overall row, then one row per class.
pub fn render_stats(report: &EvaluationReport) -> String {
    let rows: Vec<Vec<String>> = report
        .rows()
        .map(|row| {
            vec![
                row.name.clone(),
                row.total.to_string(),
                row.incorrect.to_string(),
                row.correct.to_string(),
                row.incorrect_pct.to_string(),
                row.correct_pct.to_string(),
            ]
        })
        .collect();
    render_table(&STATS_HEADER, &rows)
}

/// Per-example listing with score, bipolar result and predicted shape.
pub fn render_listing<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|record| {
            vec![
                record.name.clone(),
                format!("{}", record.score),
                record.decision().to_string(),
                record.predicted.to_string(),
            ]
        })
        .collect();
    render_table(&LISTING_HEADER, &rows)
}

/// Full report: statistics, misclassified and correctly classified listings,
/// and any failed examples.
pub fn render_report(report: &EvaluationReport) -> String {
    let mut out = String::new();
    out.push_str(&render_stats(report));
    let _ = write!(
        out,
        "\nIncorrectly classified images\n{}",
        render_listing(report.incorrect())
    );
    let _ = write!(
        out,
        "\nCorrectly classified images\n{}",
        render_listing(report.correct())
    );
    if !report.failures().is_empty() {
        out.push_str("\nFailed examples\n");
        for failure in report.failures() {
            let _ = writeln!(out, "{}: {}", failure.name, failure.reason);
        }
    }
    out
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str("| ");
    out.push_str(&line.join(" | "));
    out.push_str(" |\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_dec::Label;

    #[test]
    fn listing_shows_score_result_and_shape() {
        let record = EvaluationRecord::new("r_1.png", 42.0, Label::Rectangle, Label::Rectangle);
        let text = render_listing([&record]);
        assert!(text.contains("| r_1.png"));
        assert!(text.contains("| 42 "));
        assert!(text.contains("| 1 "));
        assert!(text.contains("Rectangle"));
    }

    #[test]
    fn empty_report_renders_not_applicable() {
        let report = EvaluationReport::from_records(Vec::new());
        let text = render_stats(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("| Overall"));
        assert!(lines[2].contains("N/A"));
        assert!(lines[3].starts_with("| Rectangle"));
        assert!(lines[4].starts_with("| Triangle"));
    }
}
