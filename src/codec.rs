//! Thin layer over the codec crates
//!
//! Decoding and color-mode detection go through `image`, PNG size work
//! through `imagequant` + `oxipng`, JPEG through `mozjpeg`, lossy WebP
//! through libwebp (`webp`).
//! Nothing here touches the output file system.

use crate::constants::{
    OXIPNG_PRESET, PNG_DITHERING_LEVEL, PNG_MAX_COLORS, PNG_QUANTIZE_SPEED, WEBP_METHOD,
};
use crate::error::{CompressionError, Result};
use image::{ColorType, DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// PNG IHDR color type for palette images.
const PNG_INDEXED_COLOR_TYPE: u8 = 3;
/// Signature (8) + IHDR length (4) + "IHDR" (4) + width (4) + height (4) + bit depth (1).
const PNG_COLOR_TYPE_OFFSET: usize = 25;

/// How the source stores its pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
    Luma,
    LumaAlpha,
    /// Pixels were indices into a palette before decoding
    Indexed,
}

impl ColorMode {
    fn from_color_type(color: ColorType) -> Self {
        match (color.has_color(), color.has_alpha()) {
            (true, true) => ColorMode::Rgba,
            (true, false) => ColorMode::Rgb,
            (false, true) => ColorMode::LumaAlpha,
            (false, false) => ColorMode::Luma,
        }
    }
}

/// A decoded image plus what we learned about its source
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub source_format: Option<ImageFormat>,
    pub color_mode: ColorMode,
}

impl LoadedImage {
    pub fn new(image: DynamicImage, source_format: Option<ImageFormat>, color_mode: ColorMode) -> Self {
        Self {
            image,
            source_format,
            color_mode,
        }
    }

    /// Wraps an in-memory image, deriving the color mode from its buffer.
    pub fn from_image(image: DynamicImage, source_format: Option<ImageFormat>) -> Self {
        let color_mode = ColorMode::from_color_type(image.color());
        Self::new(image, source_format, color_mode)
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn is_indexed(&self) -> bool {
        self.color_mode == ColorMode::Indexed
    }

    pub fn map_image(self, f: impl FnOnce(DynamicImage) -> DynamicImage) -> Self {
        Self {
            image: f(self.image),
            ..self
        }
    }
}

/// Decodes the image at `path`, sniffing the format from its content.
pub fn load(path: &Path) -> Result<LoadedImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let source_format = reader.format();

    let image = reader.decode().map_err(|source| CompressionError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let color_mode = if is_palette_source(path, source_format)? {
        ColorMode::Indexed
    } else {
        ColorMode::from_color_type(image.color())
    };

    log::debug!(
        "Loaded {}: {}x{} {:?} ({:?})",
        path.display(),
        image.width(),
        image.height(),
        source_format,
        color_mode
    );

    Ok(LoadedImage::new(image, source_format, color_mode))
}

/// The `image` crate expands palettes while decoding, so peek at the header.
fn is_palette_source(path: &Path, format: Option<ImageFormat>) -> Result<bool> {
    match format {
        Some(ImageFormat::Gif) => Ok(true),
        Some(ImageFormat::Png) => {
            let mut header = [0u8; PNG_COLOR_TYPE_OFFSET + 1];
            File::open(path)?.read_exact(&mut header)?;
            Ok(header[PNG_COLOR_TYPE_OFFSET] == PNG_INDEXED_COLOR_TYPE)
        }
        _ => Ok(false),
    }
}

/// Reduces `img` to at most 256 colors (libimagequant's median-cut variant).
///
/// With `keep_alpha` the palette carries alpha and an RGBA image comes back;
/// otherwise the image is flattened to RGB first and RGB comes back.
pub fn quantize(img: &DynamicImage, keep_alpha: bool) -> Result<DynamicImage> {
    let rgba = if keep_alpha {
        img.to_rgba8()
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8()).to_rgba8()
    };
    let (width, height) = rgba.dimensions();

    let pixels: Vec<imagequant::RGBA> = rgba
        .pixels()
        .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect();

    let quant_err = |e: imagequant::Error| CompressionError::Quantization(e.to_string());

    let mut attr = imagequant::new();
    attr.set_max_colors(PNG_MAX_COLORS).map_err(quant_err)?;
    attr.set_speed(PNG_QUANTIZE_SPEED).map_err(quant_err)?;

    let mut liq_image = attr
        .new_image(pixels, width as usize, height as usize, 0.0)
        .map_err(quant_err)?;
    let mut res = attr.quantize(&mut liq_image).map_err(quant_err)?;
    res.set_dithering_level(PNG_DITHERING_LEVEL)
        .map_err(quant_err)?;

    let (palette, indices) = res.remapped(&mut liq_image).map_err(quant_err)?;

    let quantized = if keep_alpha {
        let raw = indices
            .iter()
            .flat_map(|&i| {
                let c = palette[i as usize];
                [c.r, c.g, c.b, c.a]
            })
            .collect();
        RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8)
    } else {
        let raw = indices
            .iter()
            .flat_map(|&i| {
                let c = palette[i as usize];
                [c.r, c.g, c.b]
            })
            .collect();
        RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8)
    };

    quantized.ok_or_else(|| {
        CompressionError::Quantization("remapped buffer does not match image size".to_string())
    })
}

/// Encodes PNG and runs oxipng over the result.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    optimize_png(&buffer.into_inner())
}

fn optimize_png(png: &[u8]) -> Result<Vec<u8>> {
    let options = oxipng::Options::from_preset(OXIPNG_PRESET);
    oxipng::optimize_from_memory(png, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

/// Encodes JPEG through mozjpeg with optimized Huffman tables. The image
/// must already be 8-bit RGB or gray.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (color_space, pixels) = match img {
        DynamicImage::ImageRgb8(buf) => (mozjpeg::ColorSpace::JCS_RGB, buf.as_raw()),
        DynamicImage::ImageLuma8(buf) => (mozjpeg::ColorSpace::JCS_GRAYSCALE, buf.as_raw()),
        other => {
            return Err(CompressionError::UnsupportedConversion(format!(
                "JPEG cannot store {:?} pixels",
                other.color()
            )))
        }
    };

    let mut comp = mozjpeg::Compress::new(color_space);
    comp.set_size(img.width() as usize, img.height() as usize);
    comp.set_quality(f32::from(quality));
    comp.set_optimize_coding(true);

    let mut started = comp.start_compress(Vec::new())?;
    started.write_scanlines(pixels)?;
    Ok(started.finish()?)
}

/// Encodes lossy WebP at `quality` with libwebp's slowest, smallest method.
pub fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = (img.width(), img.height());

    let mut config = webp::WebPConfig::new()
        .map_err(|_| CompressionError::WebPEncoding("failed to initialise config".to_string()))?;
    config.lossless = 0;
    config.quality = f32::from(quality);
    config.method = WEBP_METHOD;

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_advanced(&config)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_advanced(&config)
    }
    .map_err(|e| CompressionError::WebPEncoding(format!("{:?}", e)))?;

    Ok(encoded.to_vec())
}

/// Re-encodes in `format` with the encoder's own defaults. PNG output also
/// goes through oxipng.
pub fn encode_native(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    // Most encoders only take 8-bit buffers.
    let normalized = match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => img.clone(),
        color if color.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    };

    let mut buffer = Cursor::new(Vec::new());
    normalized.write_to(&mut buffer, format)?;

    match format {
        ImageFormat::Png => optimize_png(&buffer.into_inner()),
        _ => Ok(buffer.into_inner()),
    }
}
