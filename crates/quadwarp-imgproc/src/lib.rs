#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
/// compositing of warp results onto a canvas.
pub mod compose;

/// image cropping module.
pub mod crop;

mod error;
pub use error::WarpError;

/// planar homography estimation module.
pub mod homography;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;
