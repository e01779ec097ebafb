use quadwarp_image::ImageError;

/// Errors that can occur while solving for or applying a warp.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// A supplied quadrilateral is geometrically degenerate.
    #[error("degenerate quadrilateral: corners are collinear or enclose zero area")]
    DegenerateQuad,

    /// A derived transform has no inverse.
    #[error("transform is not invertible: determinant {0} is within epsilon of zero")]
    NonInvertibleTransform(f64),

    /// The source image has no pixels to sample from.
    #[error("source image has zero width or height")]
    EmptySourceImage,

    /// An underlying image buffer operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}
