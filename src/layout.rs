use std::path::{Path, PathBuf};

use datasets::DatasetDescriptor;
use model_dec::Label;
use serde::Deserialize;

/// Folder layout of the shape datasets.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatasetLayout {
    /// Training and test images that are all rectangles.
    pub rectangles: PathBuf,
    /// Training and test images that are all triangles.
    pub triangles: PathBuf,
    /// Unseen images labelled through their `_<digit>` file name suffix.
    pub mixed: PathBuf,
}

impl DatasetLayout {
    /// Standard `rectangles`, `triangles` and `mixed` subfolders of `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            rectangles: root.join("rectangles"),
            triangles: root.join("triangles"),
            mixed: root.join("mixed"),
        }
    }

    pub fn rectangles(&self) -> DatasetDescriptor {
        DatasetDescriptor::labelled("rectangles", &self.rectangles, Label::Rectangle)
    }

    pub fn triangles(&self) -> DatasetDescriptor {
        DatasetDescriptor::labelled("triangles", &self.triangles, Label::Triangle)
    }

    pub fn mixed(&self) -> DatasetDescriptor {
        DatasetDescriptor::mixed("mixed", &self.mixed)
    }
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self::under("shapes")
    }
}
