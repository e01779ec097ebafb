//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation algorithms used when resampling
//! images during geometric transformations such as warping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: 4x4-neighborhood interpolation, smoother than bilinear at
//!   a higher computational cost

mod bicubic;
mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used in image warping
/// and transformation operations.
pub(crate) mod grid;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::InterpolationMode;

pub use interpolate::interpolate_pixel;
