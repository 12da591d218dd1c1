//! Class labels and their bipolar encoding.

use std::fmt;

/// The two shapes the detector distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Rectangle,
    Triangle,
}

impl Label {
    /// Fixed reporting order.
    pub const ALL: [Label; 2] = [Label::Rectangle, Label::Triangle];

    /// Desired output used when training on this class.
    pub fn bipolar(self) -> i64 {
        match self {
            Label::Rectangle => 1,
            Label::Triangle => -1,
        }
    }

    /// `+1` is a rectangle, anything else a triangle.
    pub fn from_bipolar(value: i8) -> Self {
        if value == 1 {
            Label::Rectangle
        } else {
            Label::Triangle
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Rectangle => "Rectangle",
            Label::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bipolar_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_bipolar(label.bipolar() as i8), label);
        }
    }
}
