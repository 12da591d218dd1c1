//! Ground-truth label resolution kept apart from the learning code.

use model_dec::Label;

use crate::{DatasetError, ExampleFile};

/// Supplies the actual class of an example file.
pub trait LabelResolver {
    fn resolve(&self, file: &ExampleFile) -> Result<Label, DatasetError>;
}

/// Every file belongs to the same class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedLabel(pub Label);

impl LabelResolver for FixedLabel {
    fn resolve(&self, _file: &ExampleFile) -> Result<Label, DatasetError> {
        Ok(self.0)
    }
}

/// Parses `<anything>_<digit>.<ext>`: `1` is a rectangle, any other integer a
/// triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilenameSuffix;

impl LabelResolver for FilenameSuffix {
    fn resolve(&self, file: &ExampleFile) -> Result<Label, DatasetError> {
        let error = |reason| DatasetError::Label {
            name: file.name.clone(),
            reason,
        };
        let stem = file
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&file.name);
        let (_, suffix) = stem
            .rsplit_once('_')
            .ok_or_else(|| error("missing `_<digit>` suffix"))?;
        let suffix = suffix.trim();
        let (negative, digits) = match suffix.as_bytes().first() {
            Some(b'-') => (true, &suffix[1..]),
            Some(b'+') => (false, &suffix[1..]),
            _ => (false, suffix),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(error("suffix is not a decimal integer"));
        }
        // Any width of integer is accepted; only the value one matters.
        let is_one = !negative && digits.trim_start_matches('0') == "1";
        Ok(if is_one {
            Label::Rectangle
        } else {
            Label::Triangle
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn file(name: &str) -> ExampleFile {
        ExampleFile {
            name: name.to_string(),
            path: PathBuf::from(name),
        }
    }

    #[rstest]
    #[case("shape_001_1.png", Label::Rectangle)]
    #[case("shape_002_0.png", Label::Triangle)]
    #[case("img_2.bmp", Label::Triangle)]
    #[case("archive.v2_1.png", Label::Rectangle)]
    #[case("no_extension_1", Label::Rectangle)]
    #[case("shape_99999999999999999999.png", Label::Triangle)]
    #[case("shape_-1.png", Label::Triangle)]
    #[case("shape_+01.png", Label::Rectangle)]
    #[case("shape_ 1 .png", Label::Rectangle)]
    fn suffix_resolves_label(#[case] name: &str, #[case] expected: Label) {
        assert_eq!(FilenameSuffix.resolve(&file(name)).unwrap(), expected);
    }

    #[rstest]
    #[case("plain.png")]
    #[case("shape_x.png")]
    #[case("shape_.png")]
    #[case("shape_-.png")]
    #[case("shape_1e3.png")]
    fn malformed_names_are_rejected(#[case] name: &str) {
        let err = FilenameSuffix.resolve(&file(name)).unwrap_err();
        assert!(matches!(err, DatasetError::Label { .. }), "{name}: {err}");
    }
}
