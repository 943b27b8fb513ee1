use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Cannot convert image: {0}")]
    UnsupportedConversion(String),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Color quantization error: {0}")]
    Quantization(String),

    #[error("WebP encoding error: {0}")]
    WebPEncoding(String),

    #[error("EXIF error: {0}")]
    Exif(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid resize bound: {0}. Must be greater than 0")]
    InvalidResizeBound(u32),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
