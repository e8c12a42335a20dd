use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid resize target: width and height must both be given and non-zero")]
    InvalidResizeTarget,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Could not determine image format of: {0}")]
    UnknownFormat(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Remote service error: {0}")]
    RemoteService(String),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
