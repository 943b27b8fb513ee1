#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A gradient so encoders have something to work on.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    }))
}

pub fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            if (x + y) % 2 == 0 { 255 } else { 64 },
        ])
    }))
}

/// Writes `img` to `dir/name` in the format implied by the extension.
pub fn write_image(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    let format = ImageFormat::from_path(&path).unwrap();
    let img = match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img.clone(),
    };
    img.save_with_format(&path, format).unwrap();
    path
}

/// One real image per supported extension plus a text file.
pub fn create_test_image_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = vec![
        write_image(dir, "photo.jpg", &gradient_rgb(64, 48)),
        write_image(dir, "logo.png", &gradient_rgba(64, 48)),
        write_image(dir, "banner.webp", &gradient_rgb(64, 48)),
    ];

    let txt_file = dir.join("notes.txt");
    File::create(&txt_file)
        .unwrap()
        .write_all(b"not an image")
        .unwrap();
    files.push(txt_file);

    files
}

pub fn create_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"definitely not a png")
        .unwrap();
    path
}

pub fn create_nested_directory_structure(dir: &Path) -> PathBuf {
    let subdir = dir.join("subdir");
    std::fs::create_dir(&subdir).unwrap();

    write_image(&subdir, "nested.png", &gradient_rgb(32, 32));
    File::create(subdir.join("nested.txt"))
        .unwrap()
        .write_all(b"nested text")
        .unwrap();

    subdir
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Blocks of 16 distinct colors; small enough for a palette PNG.
pub fn sixteen_colors(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        let i = ((x / 10) + (y / 10) * 4) % 16;
        Rgb([(i * 16) as u8, 255 - (i * 16) as u8, ((i * 97) % 256) as u8])
    }))
}

/// JPEG with an APP1 segment right after SOI.
fn write_jpeg_with_app1(dir: &Path, name: &str, img: &DynamicImage, payload: &[u8]) -> PathBuf {
    let path = write_image(dir, name, img);
    let jpeg = std::fs::read(&path).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let length = (payload.len() + 2) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(&path, out).unwrap();
    path
}

/// JPEG carrying a big-endian EXIF block with a single Orientation entry.
pub fn write_jpeg_with_orientation(
    dir: &Path,
    name: &str,
    img: &DynamicImage,
    orientation: u16,
) -> PathBuf {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(b"MM\x00\x2a\x00\x00\x00\x08");
    payload.extend_from_slice(&1u16.to_be_bytes());
    payload.extend_from_slice(&0x0112u16.to_be_bytes());
    payload.extend_from_slice(&3u16.to_be_bytes());
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.extend_from_slice(&orientation.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&0u32.to_be_bytes());
    write_jpeg_with_app1(dir, name, img, &payload)
}

/// JPEG whose EXIF block has a broken TIFF header.
pub fn write_jpeg_with_broken_exif(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    write_jpeg_with_app1(dir, name, img, b"Exif\0\0XXXX\0\0\0\0")
}
