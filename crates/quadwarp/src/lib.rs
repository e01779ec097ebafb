#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use quadwarp_image as image;

#[doc(inline)]
pub use quadwarp_imgproc as imgproc;
