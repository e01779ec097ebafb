use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quadwarp_image::{Image, ImageSize};
use quadwarp_imgproc::{
    homography::{Point, Quad},
    interpolation::InterpolationMode,
    warp::{warp_quad_to_rect, warp_rect_to_quad},
};

fn bench_warp_quad_to_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpQuadToRect");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let image = Image::<u8, 4>::new(image_size, vec![0u8; width * height * 4]).unwrap();

        // a slightly skewed region covering most of the image
        let quad = Quad::new([
            Point::new(*width as f64 * 0.1, *height as f64 * 0.05),
            Point::new(*width as f64 * 0.95, *height as f64 * 0.1),
            Point::new(*width as f64 * 0.9, *height as f64 * 0.9),
            Point::new(*width as f64 * 0.05, *height as f64 * 0.95),
        ]);

        group.bench_with_input(
            BenchmarkId::new("bilinear", &parameter_string),
            &(&image, &quad, image_size),
            |b, i| {
                let (src, quad, size) = (i.0, i.1, i.2);
                b.iter(|| {
                    warp_quad_to_rect(
                        black_box(src),
                        black_box(quad),
                        black_box(size),
                        black_box(InterpolationMode::Bilinear),
                    )
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("bicubic", &parameter_string),
            &(&image, &quad, image_size),
            |b, i| {
                let (src, quad, size) = (i.0, i.1, i.2);
                b.iter(|| {
                    warp_quad_to_rect(
                        black_box(src),
                        black_box(quad),
                        black_box(size),
                        black_box(InterpolationMode::Bicubic),
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_warp_rect_to_quad(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpRectToQuad");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size: ImageSize = [*width, *height].into();
        let image = Image::<u8, 4>::new(image_size, vec![0u8; width * height * 4]).unwrap();

        // project onto a perspective-distorted quad of similar extent
        let quad = Quad::new([
            Point::new(*width as f64 * 0.15, 0.0),
            Point::new(*width as f64, *height as f64 * 0.1),
            Point::new(*width as f64 * 0.85, *height as f64),
            Point::new(0.0, *height as f64 * 0.9),
        ]);

        group.bench_with_input(
            BenchmarkId::new("bilinear", &parameter_string),
            &(&image, &quad),
            |b, i| {
                let (src, quad) = (i.0, i.1);
                b.iter(|| {
                    warp_rect_to_quad(
                        black_box(src),
                        black_box(quad),
                        black_box(InterpolationMode::Bilinear),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_quad_to_rect, bench_warp_rect_to_quad);
criterion_main!(benches);
