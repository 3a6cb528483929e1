//! Dense image filters used by the native primitives provider: separable
//! Gaussian blur, area-averaging resize, and reductions (global maximum, mean).

mod resize;
mod separable;
mod stats;

pub use resize::{resize_area, resize_mask_area};
pub use separable::{
    blur_separable, SeparableFilter, StaticSeparableFilter, GAUSSIAN_3TAP, GAUSSIAN_5TAP,
};
pub use stats::{max_location, mean, MaxLocation};
