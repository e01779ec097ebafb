use quadwarp_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Copy a rectangular window of `src` into the pre-sized `dst`.
///
/// The window starts at `(x, y)` in `src` and takes its extent from `dst`;
/// rows are copied in parallel. Compositing uses this to clip an oversized
/// warp result to a fixed canvas before pasting, and it doubles as a plain
/// crop.
///
/// # Errors
///
/// Returns an error if the window reaches past the source image.
///
/// # Examples
///
/// ```rust
/// use quadwarp_image::{Image, ImageSize};
/// use quadwarp_imgproc::crop::crop_image;
///
/// // an opaque 3x3 warp output with a marker pixel at (2, 1)
/// let mut warped = Image::<u8, 4>::from_size_val(
///     ImageSize { width: 3, height: 3 },
///     255u8,
/// ).unwrap();
/// warped.set_pixel(2, 1, [9, 9, 9, 255]).unwrap();
///
/// let mut clipped = Image::<u8, 4>::from_size_val(
///     ImageSize { width: 2, height: 2 },
///     0u8,
/// ).unwrap();
///
/// crop_image(&warped, &mut clipped, 1, 0).unwrap();
///
/// assert_eq!(clipped.pixel(1, 1), Some([9u8, 9, 9, 255]));
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if x + dst.cols() > src.cols() || y + dst.rows() > src.rows() {
        return Err(ImageError::InvalidImageSize(
            x + dst.cols(),
            y + dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    let dst_cols = dst.cols();
    let src_data = src.as_slice();
    let src_row_len = src.cols() * C;

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // window row i starts x pixels into source row y + i
            let start = (y + i) * src_row_len + x * C;
            dst_row.copy_from_slice(&src_data[start..start + dst_cols * C]);
        });

    Ok(())
}
