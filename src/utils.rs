//! Utility functions for common operations
//!
//! Size formatting and reduction math shared by the pipeline, the batch
//! summary and the report printer.

use crate::constants::{SIZE_STEP, SIZE_UNITS, SIZE_UNIT_OVERFLOW, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{CompressionError, Result};
use std::path::Path;

/// Check if a file path carries one of the supported image extensions
///
/// # Arguments
/// * `path` - The file path to check
///
/// # Returns
/// * `true` if the extension (case-insensitive) is supported, `false` otherwise
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Validate that a path exists and return a descriptive error if not
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Format a byte count in human-readable form
///
/// Always two decimals, 1024 base: `512.00 B`, `1.50 KB`, `3.00 MB`.
/// Anything at or beyond 1024 GB is expressed in TB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;

    for unit in SIZE_UNITS {
        if size < SIZE_STEP {
            return format!("{:.2} {}", size, unit);
        }
        size /= SIZE_STEP;
    }

    format!("{:.2} {}", size, SIZE_UNIT_OVERFLOW)
}

/// Calculate the size reduction as a percentage
///
/// Positive means the output is smaller, negative means it grew. Returns 0
/// when the original is empty.
pub fn calculate_reduction(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
