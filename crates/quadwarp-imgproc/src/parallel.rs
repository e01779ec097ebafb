use rayon::prelude::*;

use quadwarp_image::Image;

/// Fill a destination image by sampling through per-pixel coordinate maps.
///
/// `map_x` and `map_y` hold one source coordinate per destination pixel in
/// row-major order. The sampler receives the coordinate pair and the mutable
/// destination pixel; rows are split across the rayon pool and no pixel is
/// visited twice, so the sampler needs no synchronization of its own.
pub fn par_iter_rows_resample<T, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &[f32],
    map_y: &[f32],
    sampler: impl Fn(&f32, &f32, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map_x.par_chunks_exact(cols))
        .zip(map_y.par_chunks_exact(cols))
        .for_each(|((dst_row, xs), ys)| {
            dst_row
                .chunks_exact_mut(C)
                .zip(xs.iter().zip(ys.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    sampler(x, y, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadwarp_image::{ImageError, ImageSize};

    #[test]
    fn resample_visits_every_pixel() -> Result<(), ImageError> {
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;

        let map_x = vec![0.0, 1.0, 0.0, 1.0];
        let map_y = vec![0.0, 0.0, 1.0, 1.0];

        par_iter_rows_resample(&mut dst, &map_x, &map_y, |&x, &y, dst_pixel| {
            dst_pixel[0] = x + 10.0 * y;
        });

        assert_eq!(dst.as_slice(), &[0.0, 1.0, 10.0, 11.0]);

        Ok(())
    }
}
