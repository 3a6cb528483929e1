//! Grayscale image containers shared by the primitives and analyzers.
//!
//! - [`ImageU8`]: borrowed 8-bit view with an explicit stride (host input).
//! - [`GrayImageU8`]: owned 8-bit buffer produced by grayscale conversion.
//! - [`ImageF32`]: owned float buffer in `[0, 1]` used for all numeric work.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, ImageU8};
