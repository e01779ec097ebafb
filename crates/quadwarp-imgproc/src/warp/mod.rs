//! Geometric image transformations through planar perspective warps.
//!
//! This module provides the two quad-based warp directions plus the raw
//! matrix-driven resampler they share:
//!
//! - [`warp_quad_to_rect`] unwarps a quadrilateral region of an image into an
//!   axis-aligned rectangle (de-skewing)
//! - [`warp_rect_to_quad`] projects a whole image onto an arbitrary
//!   quadrilateral (perspective placement)
//! - [`warp_perspective`] resamples an image through an explicit
//!   [`crate::homography::Homography`]
//!
//! # Examples
//!
//! De-skewing a quadrilateral region into a 200x100 rectangle:
//!
//! ```no_run
//! use quadwarp_image::{Image, ImageSize};
//! use quadwarp_imgproc::homography::{Point, Quad};
//! use quadwarp_imgproc::interpolation::InterpolationMode;
//! use quadwarp_imgproc::warp::warp_quad_to_rect;
//!
//! let photo = Image::<u8, 4>::from_size_val(
//!     ImageSize { width: 640, height: 480 },
//!     0u8,
//! ).unwrap();
//!
//! let corners = Quad::new([
//!     Point::new(120.0, 80.0),
//!     Point::new(520.0, 120.0),
//!     Point::new(500.0, 400.0),
//!     Point::new(100.0, 360.0),
//! ]);
//!
//! let result = warp_quad_to_rect(
//!     &photo,
//!     &corners,
//!     ImageSize { width: 200, height: 100 },
//!     InterpolationMode::Bicubic,
//! ).unwrap();
//! ```

mod perspective;
mod quad;

pub use perspective::warp_perspective;
pub use quad::{warp_quad_to_rect, warp_rect_to_quad, WarpResult};
