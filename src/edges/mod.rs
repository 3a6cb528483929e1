//! Edge processing: Sobel gradients and the binary [`EdgeMap`] every
//! structural analyzer consumes.
//!
//! Canny itself runs through `imageproc` in the native primitives provider;
//! this module owns the mask type and the gradient magnitude the subject
//! estimator reads. Borders are handled by clamping indices (replicate).

pub mod grad;
mod map;

pub use grad::{image_gradients, Grad};
pub use map::EdgeMap;
