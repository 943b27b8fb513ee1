//! EXIF orientation lookup and correction.

use crate::error::{CompressionError, Result};
use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF orientation values (tag 0x0112).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Mirror across the top-left to bottom-right diagonal.
    Transpose = 5,
    Rotate90CW = 6,
    /// Mirror across the top-right to bottom-left diagonal.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Turns `img` upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => img,
            Orientation::FlipHorizontal => img.fliph(),
            Orientation::Rotate180 => img.rotate180(),
            Orientation::FlipVertical => img.flipv(),
            Orientation::Transpose => img.rotate90().fliph(),
            Orientation::Rotate90CW => img.rotate90(),
            Orientation::Transverse => img.rotate270().fliph(),
            Orientation::Rotate270CW => img.rotate270(),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Containers kamadak-exif can pull an EXIF block out of.
fn carries_exif(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff
    )
}

/// Orientation of an already decoded file. Formats that cannot hold EXIF
/// are `Normal` without touching the file.
pub fn orientation_of(path: &Path, source_format: Option<ImageFormat>) -> Result<Orientation> {
    match source_format {
        Some(format) if carries_exif(format) => read_orientation(path),
        _ => Ok(Orientation::Normal),
    }
}

/// Reads the orientation tag from the file's EXIF block.
///
/// Files without EXIF data (or without the tag) are `Normal`. A present but
/// unreadable EXIF block is an error; the pipeline treats that as soft.
pub fn read_orientation(path: &Path) -> Result<Orientation> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(Orientation::Normal),
        Err(e) => return Err(CompressionError::Exif(e.to_string())),
    };

    let orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default();

    Ok(orientation)
}
