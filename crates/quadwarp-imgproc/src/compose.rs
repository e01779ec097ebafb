//! Caller-side compositing of warp results onto a canvas.
//!
//! The warp engine reports the warped pixels plus a placement offset; what
//! the surrounding canvas does with them is a policy decision that stays out
//! of the engine. The policies here mirror the three classic behaviors:
//! grow the canvas so the warped content lands at its correct position, snap
//! the canvas to the warped content alone, or keep the canvas fixed and clip.

use crate::crop::crop_image;
use crate::error::WarpError;
use crate::warp::WarpResult;

use quadwarp_image::{Image, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Policy for placing a warp result onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpPolicy {
    /// Resize the canvas to fit the warped content at its reported offset, so
    /// the result lines up with the geometry the caller specified.
    ResizeAndAlign,
    /// Resize the canvas to the warped content alone, discarding the offset.
    ResizeToFit,
    /// Keep the given canvas size and paste at the origin, clipping as
    /// needed.
    KeepSize(ImageSize),
}

/// Alpha-composite `src` over `dst` at an integer position.
///
/// Straight (non-premultiplied) source-over blending; the painted region is
/// clipped against the canvas, so any part of `src` falling outside `dst` is
/// silently dropped.
///
/// # Examples
///
/// ```
/// use quadwarp_image::{Image, ImageSize};
/// use quadwarp_imgproc::compose::overlay;
///
/// let stamp = Image::<u8, 4>::from_size_val(
///     ImageSize { width: 2, height: 2 },
///     255u8,
/// ).unwrap();
///
/// let mut canvas = Image::<u8, 4>::from_size_val(
///     ImageSize { width: 4, height: 4 },
///     0u8,
/// ).unwrap();
///
/// overlay(&stamp, &mut canvas, 3, 0);
///
/// assert_eq!(canvas.pixel(3, 0), Some([255u8, 255, 255, 255]));
/// assert_eq!(canvas.pixel(2, 0), Some([0u8, 0, 0, 0]));
/// ```
pub fn overlay(src: &Image<u8, 4>, dst: &mut Image<u8, 4>, x: i64, y: i64) {
    let (src_cols, src_rows) = (src.cols() as i64, src.rows() as i64);
    let (dst_cols, dst_rows) = (dst.cols() as i64, dst.rows() as i64);

    // overlap of the pasted rectangle with the canvas, in canvas coordinates
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + src_cols).min(dst_cols);
    let y1 = (y + src_rows).min(dst_rows);

    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let cols = dst.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * 4)
        .enumerate()
        .for_each(|(row, dst_row)| {
            let row = row as i64;
            if row < y0 || row >= y1 {
                return;
            }

            let src_row = ((row - y) * src_cols) as usize;
            for dx in x0..x1 {
                let src_base = (src_row + (dx - x) as usize) * 4;
                let dst_base = dx as usize * 4;

                let s = &src_data[src_base..src_base + 4];
                let d = &mut dst_row[dst_base..dst_base + 4];

                blend_pixel(s, d);
            }
        });
}

/// Source-over blend of one straight-alpha RGBA pixel.
fn blend_pixel(s: &[u8], d: &mut [u8]) {
    let sa = s[3] as f32 / 255.0;
    let da = d[3] as f32 / 255.0;

    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        d.fill(0);
        return;
    }

    for c in 0..3 {
        let sc = s[c] as f32;
        let dc = d[c] as f32;
        d[c] = ((sc * sa + dc * da * (1.0 - sa)) / oa).round().clamp(0.0, 255.0) as u8;
    }
    d[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Place a warp result onto a fresh transparent canvas according to `policy`.
///
/// Returns a new image; neither the warp result nor any existing canvas is
/// mutated.
///
/// # Errors
///
/// Returns an error if a canvas buffer cannot be allocated.
///
/// # Examples
///
/// ```
/// use quadwarp_image::{Image, ImageSize};
/// use quadwarp_imgproc::compose::{place_warped, WarpPolicy};
/// use quadwarp_imgproc::homography::{Point, Quad};
/// use quadwarp_imgproc::interpolation::InterpolationMode;
/// use quadwarp_imgproc::warp::warp_rect_to_quad;
///
/// let src = Image::<u8, 4>::from_size_val(
///     ImageSize { width: 10, height: 10 },
///     255u8,
/// ).unwrap();
///
/// let quad = Quad::new([
///     Point::new(5.0, 5.0),
///     Point::new(15.0, 5.0),
///     Point::new(15.0, 15.0),
///     Point::new(5.0, 15.0),
/// ]);
///
/// let result = warp_rect_to_quad(&src, &quad, InterpolationMode::Bilinear).unwrap();
/// let canvas = place_warped(&result, WarpPolicy::ResizeAndAlign).unwrap();
///
/// // the canvas grew to hold the content at its offset
/// assert_eq!(canvas.size(), ImageSize { width: 15, height: 15 });
/// assert_eq!(canvas.pixel(0, 0), Some([0u8, 0, 0, 0]));
/// assert_eq!(canvas.pixel(10, 10), Some([255u8, 255, 255, 255]));
/// ```
pub fn place_warped(
    result: &WarpResult<u8, 4>,
    policy: WarpPolicy,
) -> Result<Image<u8, 4>, WarpError> {
    let warped = &result.image;

    match policy {
        WarpPolicy::ResizeAndAlign => {
            let size = ImageSize {
                width: (warped.width() as i64 + result.offset.0).max(0) as usize,
                height: (warped.height() as i64 + result.offset.1).max(0) as usize,
            };
            let mut canvas = Image::from_size_val(size, 0u8)?;
            overlay(warped, &mut canvas, result.offset.0, result.offset.1);
            Ok(canvas)
        }
        WarpPolicy::ResizeToFit => Ok(warped.clone()),
        WarpPolicy::KeepSize(size) => {
            let mut canvas = Image::from_size_val(size, 0u8)?;
            if size.width < warped.width() || size.height < warped.height() {
                // clip the warped content to the canvas before pasting
                let clip_size = ImageSize {
                    width: size.width.min(warped.width()),
                    height: size.height.min(warped.height()),
                };
                let mut clipped = Image::from_size_val(clip_size, 0u8)?;
                crop_image(warped, &mut clipped, 0, 0)?;
                overlay(&clipped, &mut canvas, 0, 0);
            } else {
                overlay(warped, &mut canvas, 0, 0);
            }
            Ok(canvas)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadwarp_image::ImageError;

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Image<u8, 4> {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Image::new(ImageSize { width, height }, data).unwrap()
    }

    #[test]
    fn overlay_clips_against_canvas() -> Result<(), ImageError> {
        let stamp = solid(3, 3, [10, 20, 30, 255]);
        let mut canvas = Image::<u8, 4>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0u8,
        )?;

        overlay(&stamp, &mut canvas, -1, 2);

        assert_eq!(canvas.pixel(0, 2), Some([10u8, 20, 30, 255]));
        assert_eq!(canvas.pixel(1, 3), Some([10u8, 20, 30, 255]));
        assert_eq!(canvas.pixel(2, 2), Some([0u8, 0, 0, 0]));
        assert_eq!(canvas.pixel(0, 1), Some([0u8, 0, 0, 0]));

        Ok(())
    }

    #[test]
    fn overlay_blends_alpha() -> Result<(), ImageError> {
        // half-transparent black over opaque white
        let stamp = solid(1, 1, [0, 0, 0, 128]);
        let mut canvas = solid(1, 1, [255, 255, 255, 255]);

        overlay(&stamp, &mut canvas, 0, 0);

        let px = canvas.pixel(0, 0).unwrap();
        assert_eq!(px[3], 255);
        // white dimmed by a 128/255 black layer
        assert!(px[0] == 127 || px[0] == 128);

        Ok(())
    }

    #[test]
    fn overlay_fully_outside_is_noop() -> Result<(), ImageError> {
        let stamp = solid(2, 2, [255, 0, 0, 255]);
        let mut canvas = Image::<u8, 4>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0u8,
        )?;

        overlay(&stamp, &mut canvas, 10, -10);

        assert!(canvas.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn place_resize_and_align() -> Result<(), WarpError> {
        let result = WarpResult {
            image: solid(4, 4, [1, 2, 3, 255]),
            offset: (2, 1),
        };

        let canvas = place_warped(&result, WarpPolicy::ResizeAndAlign)?;

        assert_eq!(
            canvas.size(),
            ImageSize {
                width: 6,
                height: 5
            }
        );
        assert_eq!(canvas.pixel(1, 0), Some([0u8, 0, 0, 0]));
        assert_eq!(canvas.pixel(2, 1), Some([1u8, 2, 3, 255]));
        assert_eq!(canvas.pixel(5, 4), Some([1u8, 2, 3, 255]));

        Ok(())
    }

    #[test]
    fn place_resize_and_align_negative_offset_clips() -> Result<(), WarpError> {
        let result = WarpResult {
            image: solid(4, 4, [9, 9, 9, 255]),
            offset: (-2, 0),
        };

        let canvas = place_warped(&result, WarpPolicy::ResizeAndAlign)?;

        assert_eq!(
            canvas.size(),
            ImageSize {
                width: 2,
                height: 4
            }
        );
        // the two left columns of the warped image fell off the canvas
        assert_eq!(canvas.pixel(0, 0), Some([9u8, 9, 9, 255]));
        assert_eq!(canvas.pixel(1, 3), Some([9u8, 9, 9, 255]));

        Ok(())
    }

    #[test]
    fn place_resize_to_fit_discards_offset() -> Result<(), WarpError> {
        let result = WarpResult {
            image: solid(3, 2, [4, 5, 6, 255]),
            offset: (7, 7),
        };

        let canvas = place_warped(&result, WarpPolicy::ResizeToFit)?;

        assert_eq!(
            canvas.size(),
            ImageSize {
                width: 3,
                height: 2
            }
        );
        assert_eq!(canvas.pixel(0, 0), Some([4u8, 5, 6, 255]));

        Ok(())
    }

    #[test]
    fn place_keep_size_clips() -> Result<(), WarpError> {
        let result = WarpResult {
            image: solid(4, 4, [8, 8, 8, 255]),
            offset: (1, 1),
        };

        let canvas = place_warped(
            &result,
            WarpPolicy::KeepSize(ImageSize {
                width: 2,
                height: 3,
            }),
        )?;

        assert_eq!(
            canvas.size(),
            ImageSize {
                width: 2,
                height: 3
            }
        );
        assert_eq!(canvas.pixel(0, 0), Some([8u8, 8, 8, 255]));
        assert_eq!(canvas.pixel(1, 2), Some([8u8, 8, 8, 255]));

        Ok(())
    }
}
