use super::bilinear::bilinear_interpolation;
use quadwarp_image::{Image, ImageDtype};

/// Catmull-Rom weights (a = -0.5) for the four taps around a sample at
/// fractional offset `t` from the second tap.
fn catmull_rom_weights(t: f32) -> [f32; 4] {
    [
        ((-0.5 * t + 1.0) * t - 0.5) * t,
        (1.5 * t - 2.5) * t * t + 1.0,
        ((-1.5 * t + 2.0) * t + 0.5) * t,
        (0.5 * t - 0.5) * t * t,
    ]
}

/// Kernel for bicubic interpolation over a 4x4 neighborhood
///
/// Falls back to bilinear interpolation at source-edge pixels where the full
/// neighborhood is unavailable.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `c` - The channel of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel value.
pub(crate) fn bicubic_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    c: usize,
) -> f32 {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = u.floor() as i64;
    let iv = v.floor() as i64;

    // the 4x4 window spans [iu - 1, iu + 2] x [iv - 1, iv + 2]
    if iu < 1 || iv < 1 || iu + 2 >= cols as i64 || iv + 2 >= rows as i64 {
        return bilinear_interpolation(image, u, v, c);
    }

    let wu = catmull_rom_weights(u - iu as f32);
    let wv = catmull_rom_weights(v - iv as f32);

    let (iu, iv) = (iu as usize, iv as usize);
    let data = image.as_slice();

    let mut acc = 0.0;
    for (j, wvj) in wv.iter().enumerate() {
        let row = (iv + j - 1) * cols;
        let mut row_acc = 0.0;
        for (i, wui) in wu.iter().enumerate() {
            let base = (row + iu + i - 1) * C + c;
            let val: f32 = unsafe { (*data.get_unchecked(base)).into() };
            row_acc += wui * val;
        }
        acc += wvj * row_acc;
    }

    acc
}
