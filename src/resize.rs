use image::imageops::FilterType;
use image::DynamicImage;
use std::fmt;

/// Pixel dimensions of an image, both axes positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(img: &DynamicImage) -> Self {
        Self::new(img.width(), img.height())
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// `value * num / den`, rounded down, never below one pixel.
fn scale_floor(value: u32, num: u32, den: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(num) / u64::from(den);
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

/// Computes the size an image should be shrunk to.
///
/// The width bound is applied first. The height bound is then checked
/// against the already-scaled height and, when it binds, recomputes the
/// width from that height, overriding the first pass. An image bound on
/// both axes therefore ends up exactly `max_height` tall and possibly
/// narrower than `max_width`. Bounds only shrink; nothing is enlarged.
pub fn compute_target_size(
    original: Dimensions,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> Dimensions {
    if max_width.is_none() && max_height.is_none() {
        return original;
    }

    let mut target = original;

    if let Some(max_w) = max_width.filter(|&w| w > 0) {
        if target.width > max_w {
            target.height = scale_floor(target.height, max_w, target.width);
            target.width = max_w;
        }
    }

    if let Some(max_h) = max_height.filter(|&h| h > 0) {
        if target.height > max_h {
            target.width = scale_floor(target.width, max_h, target.height);
            target.height = max_h;
        }
    }

    target
}

/// Resamples `img` to `target` with Lanczos3, or hands it back untouched
/// when it already has that size.
pub fn resize_image(img: DynamicImage, target: Dimensions) -> DynamicImage {
    let current = Dimensions::of(&img);
    if current == target {
        return img;
    }

    log::debug!("Resizing {} -> {}", current, target);
    img.resize_exact(target.width, target.height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions::new(width, height)
    }

    #[test]
    fn test_no_constraints_returns_original() {
        assert_eq!(compute_target_size(dims(3000, 2000), None, None), dims(3000, 2000));
    }

    #[test]
    fn test_width_only() {
        assert_eq!(
            compute_target_size(dims(3000, 2000), Some(1500), None),
            dims(1500, 1000)
        );
    }

    #[test]
    fn test_height_override_wins_when_both_bind() {
        assert_eq!(
            compute_target_size(dims(3000, 2000), Some(1500), Some(600)),
            dims(900, 600)
        );
    }

    #[test]
    fn test_height_only() {
        assert_eq!(
            compute_target_size(dims(2000, 1500), None, Some(750)),
            dims(1000, 750)
        );
    }

    #[test]
    fn test_no_upscaling() {
        assert_eq!(
            compute_target_size(dims(800, 600), Some(1600), None),
            dims(800, 600)
        );
        assert_eq!(
            compute_target_size(dims(800, 600), Some(1600), Some(1200)),
            dims(800, 600)
        );
    }

    #[test]
    fn test_height_bound_not_reached_after_width_pass() {
        // 4000x1000 -> 2000x500, height bound of 600 no longer binds
        assert_eq!(
            compute_target_size(dims(4000, 1000), Some(2000), Some(600)),
            dims(2000, 500)
        );
    }

    #[test]
    fn test_rounds_down() {
        // 1000 * 333 / 1001 = 332.66...
        assert_eq!(
            compute_target_size(dims(1001, 1000), Some(333), None),
            dims(333, 332)
        );
    }

    #[test]
    fn test_thin_image_keeps_one_pixel() {
        assert_eq!(
            compute_target_size(dims(10_000, 1), Some(100), None),
            dims(100, 1)
        );
    }

    #[test]
    fn test_resize_image_changes_dimensions() {
        let img = DynamicImage::new_rgb8(200, 100);
        let resized = resize_image(img, dims(50, 25));
        assert_eq!(Dimensions::of(&resized), dims(50, 25));
    }

    #[test]
    fn test_resize_image_same_dimensions() {
        let img = DynamicImage::new_rgba8(64, 32);
        let resized = resize_image(img, dims(64, 32));
        assert_eq!(Dimensions::of(&resized), dims(64, 32));
    }
}
