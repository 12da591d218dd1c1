use std::fmt;

/// Share of a whole, or `NotApplicable` when the whole is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Percentage {
    Value(f64),
    NotApplicable,
}

impl Percentage {
    /// `part / whole * 100`, never dividing by zero.
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            Percentage::NotApplicable
        } else {
            Percentage::Value(part as f64 / whole as f64 * 100.0)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Percentage::Value(value) => Some(value),
            Percentage::NotApplicable => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Value(value) => write!(f, "{value:.2}%"),
            Percentage::NotApplicable => f.write_str("N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Percentage;

    #[test]
    fn zero_denominator_is_not_applicable() {
        assert_eq!(Percentage::of(0, 0), Percentage::NotApplicable);
        assert_eq!(Percentage::of(0, 0).to_string(), "N/A");
        assert_eq!(Percentage::of(0, 0).value(), None);
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(Percentage::of(1, 3).to_string(), "33.33%");
        assert_eq!(Percentage::of(4, 4).to_string(), "100.00%");
    }
}
