//! Bipolar image encoding used by the Hebbian shape detector.

pub mod bipolar;
pub mod pixels;

pub use bipolar::{BipolarEncoder, ImageMatrix};
pub use pixels::{EncodeError, PixelMatrix, Shape};
