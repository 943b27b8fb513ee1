use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gyuu::codec::LoadedImage;
use gyuu::formats::FormatTag;
use gyuu::resize::{compute_target_size, resize_image, Dimensions};
use gyuu::{compress, CompressionOptions};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn bench_compression_options_creation(c: &mut Criterion) {
    c.bench_function("compression_options_creation", |b| {
        b.iter(|| {
            CompressionOptions::new(
                black_box(Some(85)),
                black_box(None),
                black_box(Some(800)),
                black_box(Some(600)),
            )
        })
    });
}

fn bench_target_size(c: &mut Criterion) {
    c.bench_function("compute_target_size", |b| {
        b.iter(|| {
            compute_target_size(
                black_box(Dimensions::new(3840, 2160)),
                black_box(Some(1920)),
                black_box(Some(1000)),
            )
        })
    });
}

fn bench_image_resizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_resizing");

    for (width, height) in [(800, 600), (1920, 1080)] {
        let img = create_test_image(width, height);
        let target = Dimensions::new(width / 2, height / 2);

        group.bench_with_input(
            BenchmarkId::new("lanczos3", format!("{}x{}", width, height)),
            &img,
            |b, img| b.iter(|| resize_image(black_box(img.clone()), target)),
        );
    }

    group.finish();
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.sample_size(10);

    let loaded = LoadedImage::from_image(create_test_image(640, 480), Some(ImageFormat::Png));

    for tag in [FormatTag::Png, FormatTag::Jpg, FormatTag::WebP] {
        group.bench_with_input(BenchmarkId::new("format", tag.as_str()), &tag, |b, tag| {
            b.iter(|| compress(black_box(&loaded), tag, black_box(80)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_options_creation,
    bench_target_size,
    bench_image_resizing,
    bench_compress
);
criterion_main!(benches);
