use crate::codec::{self, LoadedImage};
use crate::error::{CompressionError, Result};
use crate::formats::FormatTag;
use image::{ColorType, DynamicImage};

/// Encoding policy chosen for a resolved format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Palette quantization + oxipng; quality is ignored.
    Png,
    /// Lossy JPEG at the requested quality.
    Jpeg,
    /// Lossy WebP at the requested quality, maximum effort.
    WebP,
    /// Re-save in the source's own format; quality is ignored.
    Passthrough,
}

impl Strategy {
    pub fn for_tag(tag: &FormatTag) -> Self {
        match tag {
            FormatTag::Png => Strategy::Png,
            FormatTag::Jpg => Strategy::Jpeg,
            FormatTag::WebP => Strategy::WebP,
            FormatTag::Other(_) => Strategy::Passthrough,
        }
    }
}

/// Encodes `loaded` according to the strategy for `tag`.
pub fn compress(loaded: &LoadedImage, tag: &FormatTag, quality: u8) -> Result<Vec<u8>> {
    let strategy = Strategy::for_tag(tag);
    log::debug!("Compressing as {} using {:?} (quality {})", tag, strategy, quality);

    match strategy {
        Strategy::Png => compress_png(loaded),
        Strategy::Jpeg => compress_jpeg(loaded, quality),
        Strategy::WebP => codec::encode_webp(&loaded.image, quality),
        Strategy::Passthrough => compress_passthrough(loaded),
    }
}

fn compress_png(loaded: &LoadedImage) -> Result<Vec<u8>> {
    let prepared = if loaded.has_alpha() {
        codec::quantize(&loaded.image, true)?
    } else if loaded.is_indexed() {
        // Already at most 256 colors; oxipng restores the palette.
        loaded.image.clone()
    } else {
        codec::quantize(&loaded.image, false)?
    };

    codec::encode_png(&prepared)
}

fn compress_jpeg(loaded: &LoadedImage, quality: u8) -> Result<Vec<u8>> {
    let image = &loaded.image;
    let jpeg_ready = if loaded.has_alpha() || loaded.is_indexed() {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        match image.color() {
            ColorType::Rgb8 | ColorType::L8 => image.clone(),
            ColorType::L16 => DynamicImage::ImageLuma8(image.to_luma8()),
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    };

    codec::encode_jpeg(&jpeg_ready, quality)
}

fn compress_passthrough(loaded: &LoadedImage) -> Result<Vec<u8>> {
    let format = loaded.source_format.ok_or_else(|| {
        CompressionError::UnsupportedFormat("could not detect the source format".to_string())
    })?;

    codec::encode_native(&loaded.image, format)
}
