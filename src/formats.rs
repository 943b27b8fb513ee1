//! Image format utilities and type-safe format handling
//!
//! `OutputFormat` is what a user may ask for explicitly; `FormatTag` is what
//! the pipeline actually resolved for a given input, including extensions it
//! has no dedicated strategy for.

use crate::error::{CompressionError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Formats that can be requested as an explicit output override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// PNG with palette quantization and lossless optimization
    Png,
    /// JPEG with lossy compression
    Jpeg,
    /// WebP with lossy compression
    WebP,
}

impl OutputFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
        }
    }

    /// Get format names for CLI help text
    pub fn format_names() -> Vec<&'static str> {
        vec!["png", "jpg", "webp"]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::WebP),
            _ => Err(CompressionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// The format tag the pipeline settled on for one input
///
/// Tags without a dedicated strategy keep their lower-cased extension in
/// `Other` (empty when the path has none).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Png,
    Jpg,
    WebP,
    Other(String),
}

impl FormatTag {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "png" => FormatTag::Png,
            "jpg" | "jpeg" => FormatTag::Jpg,
            "webp" => FormatTag::WebP,
            other => FormatTag::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FormatTag::Png => "png",
            FormatTag::Jpg => "jpg",
            FormatTag::WebP => "webp",
            FormatTag::Other(ext) => ext,
        }
    }
}

impl From<OutputFormat> for FormatTag {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => FormatTag::Png,
            OutputFormat::Jpeg => FormatTag::Jpg,
            OutputFormat::WebP => FormatTag::WebP,
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the format tag for an input path and optional override
///
/// An explicit format always wins. Otherwise the input's extension decides,
/// with `jpeg` folded into `jpg`. Never fails.
pub fn resolve(input_path: &Path, explicit: Option<OutputFormat>) -> FormatTag {
    if let Some(format) = explicit {
        return format.into();
    }

    let extension = input_path
        .extension()
        .map(|ext| ext.to_string_lossy())
        .unwrap_or_default();
    FormatTag::from_extension(&extension)
}
