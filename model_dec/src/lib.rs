//! Decision rule translating linear scores into shape labels.

pub mod label;

pub use label::Label;

/// Maps a score to the bipolar decision `+1` or `-1`.
///
/// Only strictly positive scores produce `+1`. A score of exactly zero falls
/// on the `-1` side, so an untrained or fully cancelled model answers
/// [`Label::Triangle`] for every input.
pub fn decide(score: f64) -> i8 {
    if score > 0.0 { 1 } else { -1 }
}

/// Decoder that attaches class semantics to [`decide`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BipolarDecoder;

impl BipolarDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Converts a score into its predicted label.
    pub fn decode(&self, score: f64) -> Label {
        Label::from_bipolar(decide(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, 1)]
    #[case(0.5, 1)]
    #[case(0.0, -1)]
    #[case(-0.0, -1)]
    #[case(-3.0, -1)]
    fn threshold_is_strictly_positive(#[case] score: f64, #[case] expected: i8) {
        assert_eq!(decide(score), expected);
    }

    #[test]
    fn nan_scores_are_negative() {
        assert_eq!(decide(f64::NAN), -1);
    }

    #[test]
    fn decoder_names_the_class() {
        let decoder = BipolarDecoder::new();
        assert_eq!(decoder.decode(4.0), Label::Rectangle);
        assert_eq!(decoder.decode(0.0), Label::Triangle);
    }
}
