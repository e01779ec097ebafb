use crate::{
    error::WarpError,
    homography::{get_perspective_transform, Homography, Quad},
    interpolation::InterpolationMode,
};

use quadwarp_image::{Image, ImageDtype, ImageSize};

use super::perspective::warp_perspective;

/// The outcome of warping an image through a quadrilateral.
///
/// Owns the warped pixels plus the integer translation a caller must apply
/// when compositing the result back onto the background it was warped
/// against.
#[derive(Clone)]
pub struct WarpResult<T, const C: usize> {
    /// The warped image.
    pub image: Image<T, C>,
    /// Offset `(x, y)` aligning the warped image with the coordinate space of
    /// the operation that requested the warp.
    pub offset: (i64, i64),
}

/// Axis-aligned bounding box of the quad corners mapped through `m`,
/// entirely from transformed points.
fn transformed_bounds(quad: &Quad, m: &Homography) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &corner in &quad.0 {
        let p = m.transform_point(corner);
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    (min_x, min_y, max_x, max_y)
}

fn check_source<T, const C: usize>(src: &Image<T, C>) -> Result<(), WarpError> {
    if src.width() == 0 || src.height() == 0 {
        return Err(WarpError::EmptySourceImage);
    }
    Ok(())
}

/// Unwarps a quadrilateral region of `src` into an axis-aligned rectangle.
///
/// The quad is treated as a region of the source content (clockwise from the
/// conceptual upper-left corner) and is projected onto the full
/// `dst_size` rectangle, de-skewing a photographed rectangular object into a
/// straight-on view. The forward transform maps the quad corners exactly onto
/// the destination rectangle corners, so the reported offset is `(0, 0)`.
///
/// # Errors
///
/// * [`WarpError::EmptySourceImage`] when `src` has zero width or height.
/// * [`WarpError::DegenerateQuad`] when the quad corners are collinear or
///   enclose zero area.
/// * [`WarpError::NonInvertibleTransform`] when the solved transform cannot
///   be inverted.
///
/// # Example
///
/// ```
/// use quadwarp_image::{Image, ImageSize};
/// use quadwarp_imgproc::homography::Quad;
/// use quadwarp_imgproc::interpolation::InterpolationMode;
/// use quadwarp_imgproc::warp::warp_quad_to_rect;
///
/// let src = Image::<u8, 4>::from_size_val(
///   ImageSize { width: 8, height: 8 },
///   255u8,
/// ).unwrap();
///
/// let quad = Quad::from_rect(8.0, 8.0);
/// let out_size = ImageSize { width: 4, height: 4 };
///
/// let result = warp_quad_to_rect(&src, &quad, out_size, InterpolationMode::Bicubic).unwrap();
///
/// assert_eq!(result.image.size(), out_size);
/// assert_eq!(result.offset, (0, 0));
/// ```
pub fn warp_quad_to_rect<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    quad: &Quad,
    dst_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<WarpResult<T, C>, WarpError> {
    check_source(src)?;

    let dst_corners = Quad::from_rect(dst_size.width as f64, dst_size.height as f64);
    let m = get_perspective_transform(quad, &dst_corners)?;

    let mut dst = Image::from_size_val(dst_size, T::default())?;
    warp_perspective(src, &mut dst, &m, interpolation)?;

    Ok(WarpResult {
        image: dst,
        offset: (0, 0),
    })
}

/// Projects the full extent of `src` onto an arbitrary quadrilateral.
///
/// The source rectangle corners map onto the quad corners in order, giving a
/// simulated perspective placement. The output buffer is sized to the
/// axis-aligned bounding box of the warped content and `offset` reports the
/// bounding box minimum, so pasting the result at `offset` on a background
/// canvas lines it up with the requested quad geometry. Output pixels outside
/// the mapped source region stay fully transparent.
///
/// # Errors
///
/// * [`WarpError::EmptySourceImage`] when `src` has zero width or height.
/// * [`WarpError::DegenerateQuad`] when the quad corners are collinear or
///   enclose zero area.
/// * [`WarpError::NonInvertibleTransform`] when the solved transform cannot
///   be inverted.
///
/// # Example
///
/// ```
/// use quadwarp_image::{Image, ImageSize};
/// use quadwarp_imgproc::homography::{Point, Quad};
/// use quadwarp_imgproc::interpolation::InterpolationMode;
/// use quadwarp_imgproc::warp::warp_rect_to_quad;
///
/// let src = Image::<u8, 4>::from_size_val(
///   ImageSize { width: 10, height: 10 },
///   255u8,
/// ).unwrap();
///
/// // shift the image wholly into negative coordinates
/// let quad = Quad::new([
///     Point::new(-20.0, -20.0),
///     Point::new(-10.0, -20.0),
///     Point::new(-10.0, -10.0),
///     Point::new(-20.0, -10.0),
/// ]);
///
/// let result = warp_rect_to_quad(&src, &quad, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(result.offset, (-20, -20));
/// assert_eq!(result.image.size(), ImageSize { width: 10, height: 10 });
/// ```
pub fn warp_rect_to_quad<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    quad: &Quad,
    interpolation: InterpolationMode,
) -> Result<WarpResult<T, C>, WarpError> {
    check_source(src)?;

    let src_corners = Quad::from_rect(src.width() as f64, src.height() as f64);
    let m = get_perspective_transform(&src_corners, quad)?;

    // size the output to the warped content and remember where it lands;
    // rounding to pixel addresses happens here and nowhere earlier
    let (min_x, min_y, max_x, max_y) = transformed_bounds(&src_corners, &m);
    let offset = (min_x.floor() as i64, min_y.floor() as i64);
    let dst_size = ImageSize {
        width: (max_x.ceil() - min_x.floor()).max(0.0) as usize,
        height: (max_y.ceil() - min_y.floor()).max(0.0) as usize,
    };

    // fold the offset into the transform so the output grid starts at (0, 0)
    let shift = Homography::from_translation(-offset.0 as f64, -offset.1 as f64);
    let m = shift.compose(&m);

    let mut dst = Image::from_size_val(dst_size, T::default())?;
    warp_perspective(src, &mut dst, &m, interpolation)?;

    Ok(WarpResult { image: dst, offset })
}
