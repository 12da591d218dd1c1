use model_enc::PixelMatrix;

/// One example handed to the trainer: a decoded image or the reason decoding
/// failed.
#[derive(Debug)]
pub struct Sample {
    pub name: String,
    pub pixels: anyhow::Result<PixelMatrix>,
}

impl Sample {
    pub fn decoded(name: impl Into<String>, pixels: PixelMatrix) -> Self {
        Self {
            name: name.into(),
            pixels: Ok(pixels),
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<anyhow::Error>) -> Self {
        Self {
            name: name.into(),
            pixels: Err(error.into()),
        }
    }
}

/// Example left out of a batch together with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedSample {
    pub name: String,
    pub reason: String,
}
