//! Grayscale decoding backed by the `image` crate.

use std::path::Path;

use image::ImageReader;
use model_enc::{PixelMatrix, Shape};

use crate::DatasetError;

/// Produces decoded grayscale pixels for an image file.
pub trait PixelSource {
    fn load(&self, path: &Path) -> Result<PixelMatrix, DatasetError>;
}

/// Decodes any supported format and converts it to 8-bit luma.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrayscaleDecoder;

impl PixelSource for GrayscaleDecoder {
    fn load(&self, path: &Path) -> Result<PixelMatrix, DatasetError> {
        let decode_err = |source| DatasetError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .with_guessed_format()
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let luma = reader.decode().map_err(decode_err)?.into_luma8();
        let shape = Shape::new(luma.height() as usize, luma.width() as usize);
        PixelMatrix::from_raw(shape, luma.into_raw()).ok_or_else(|| {
            decode_err(image::ImageError::Limits(
                image::error::LimitError::from_kind(image::error::LimitErrorKind::DimensionError),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::tempdir;

    #[test]
    fn decodes_png_rows_and_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide_1.png");
        let mut img = GrayImage::from_pixel(3, 2, Luma([255]));
        img.put_pixel(2, 1, Luma([0]));
        img.save(&path).unwrap();

        let pixels = GrayscaleDecoder.load(&path).unwrap();
        assert_eq!(pixels.shape(), Shape::new(2, 3));
        assert_eq!(pixels.as_array()[[1, 2]], 0);
        assert_eq!(pixels.as_array()[[0, 0]], 255);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken_1.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = GrayscaleDecoder.load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Decode { .. }), "{err}");
    }
}
