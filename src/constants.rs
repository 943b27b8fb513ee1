pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Extensions (lower-case, without the dot) picked up by directory batches.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

pub const PNG_MAX_COLORS: u32 = 256;
pub const PNG_QUANTIZE_SPEED: i32 = 4;
pub const PNG_DITHERING_LEVEL: f32 = 1.0;
pub const OXIPNG_PRESET: u8 = 4;

/// libwebp `method`: 0 is fastest, 6 spends the most effort on size.
pub const WEBP_METHOD: i32 = 6;

pub const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB"];
pub const SIZE_UNIT_OVERFLOW: &str = "TB";
pub const SIZE_STEP: f64 = 1024.0;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

// Common output message prefixes
pub const BANNER: &str = "🗜️  gyuu - compressing images...";
pub const DONE_MESSAGE: &str = "✨ Done!";
pub const SUMMARY_PREFIX: &str = "📊";
pub const SUCCESS_PREFIX: &str = "✅";
pub const ERROR_PREFIX: &str = "❌";
pub const SUMMARY_RULE_WIDTH: usize = 50;
