//! Dataset plumbing around the detector: folder listing, image decoding and
//! ground-truth label resolution.

pub mod decode;
pub mod labels;

use std::fs;
use std::path::{Path, PathBuf};

use model_dec::Label;
use thiserror::Error;
use tracing::debug;

pub use decode::{GrayscaleDecoder, PixelSource};
pub use labels::{FilenameSuffix, FixedLabel, LabelResolver};

/// Errors raised while locating, decoding or labelling examples.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Listing a folder or reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The image codec could not decode the file.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The file name does not carry a usable `_<digit>` label suffix.
    #[error("cannot resolve label for `{name}`: {reason}")]
    Label { name: String, reason: &'static str },
}

/// Folder of example images, optionally bound to a single class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetDescriptor {
    /// Human readable dataset identifier.
    pub name: String,
    /// Directory holding the images.
    pub dir: PathBuf,
    /// Class shared by every file; `None` resolves labels from file names.
    pub label: Option<Label>,
}

impl DatasetDescriptor {
    /// Creates a descriptor for a single-class folder.
    pub fn labelled(name: impl Into<String>, dir: impl Into<PathBuf>, label: Label) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            label: Some(label),
        }
    }

    /// Creates a descriptor whose labels come from the file names.
    pub fn mixed(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            label: None,
        }
    }

    /// Resolver matching the descriptor's labelling scheme.
    pub fn resolver(&self) -> Box<dyn LabelResolver> {
        match self.label {
            Some(label) => Box::new(FixedLabel(label)),
            None => Box::new(FilenameSuffix),
        }
    }

    /// Lists the example files of this dataset.
    pub fn files(&self) -> Result<Vec<ExampleFile>, DatasetError> {
        list_examples(&self.dir)
    }
}

/// One file of a dataset folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExampleFile {
    pub name: String,
    pub path: PathBuf,
}

/// Lists regular, non-hidden files of `dir` sorted by name.
pub fn list_examples(dir: &Path) -> Result<Vec<ExampleFile>, DatasetError> {
    let io_err = |source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        files.push(ExampleFile {
            name,
            path: entry.path(),
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(dir = %dir.display(), count = files.len(), "listed dataset folder");
    Ok(files)
}
