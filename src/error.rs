//! Crate-wide error type.
//!
//! Every fallible operation returns [`Result`]. There are no sentinel
//! values: a failed call yields a tagged [`Error`] a caller can match on.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input does not describe a valid image buffer.
    #[error("invalid image input: {0}")]
    InvalidInput(String),

    /// A noise model name that the crate does not recognize.
    #[error("unsupported noise model `{0}`")]
    UnsupportedModel(String),

    /// A numeric parameter outside its documented domain.
    #[error("parameter out of range: {0}")]
    ParameterOutOfRange(String),

    /// The codec could not decode the supplied bytes.
    #[error("failed to decode image data: {0}")]
    Decode(#[source] image::ImageError),

    /// The codec could not encode to the target file.
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Fetching image bytes from a URL failed.
    #[error("failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    /// Filesystem access failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The display backend reported a failure.
    #[cfg(feature = "display")]
    #[error("display error: {0}")]
    Display(String),
}
