use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_3TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }

    /// Gaussian kernel for a 3 or 5 aperture; `None` for any other size.
    pub fn gaussian(ksize: usize) -> Option<Self> {
        match ksize {
            3 => Some(GAUSSIAN_3TAP),
            5 => Some(GAUSSIAN_5TAP),
            _ => None,
        }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 3-tap Gaussian filter `[1, 2, 1] / 4`.
pub const GAUSSIAN_3TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[0.25, 0.5, 0.25]);

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Horizontal then vertical pass of `filter`, replicating border pixels.
pub fn blur_separable(inp: &ImageF32, filter: &impl SeparableFilter) -> ImageF32 {
    let w = inp.w;
    let h = inp.h;
    let taps = filter.taps();
    if w == 0 || h == 0 || taps.is_empty() {
        return inp.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src = inp.row(y);
        let dst = tmp.row_mut(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let xx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += src[xx] * t;
            }
            *out = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let yy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
            let src = tmp.row(yy);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d += s * t;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_constant_image() {
        let img = ImageF32::from_fn(7, 5, |_, _| 0.4);
        let out = blur_separable(&img, &GAUSSIAN_5TAP);
        assert!(out.data.iter().all(|&v| (v - 0.4).abs() < 1e-6));
    }

    #[test]
    fn only_tabulated_apertures_have_kernels() {
        assert_eq!(StaticSeparableFilter::gaussian(3).map(|f| f.taps().len()), Some(3));
        assert_eq!(StaticSeparableFilter::gaussian(5).map(|f| f.taps().len()), Some(5));
        assert!(StaticSeparableFilter::gaussian(7).is_none());
        assert!(StaticSeparableFilter::gaussian(1).is_none());
    }

    #[test]
    fn blur_spreads_impulse() {
        let img = ImageF32::from_fn(5, 5, |x, y| if x == 2 && y == 2 { 1.0 } else { 0.0 });
        let out = blur_separable(&img, &GAUSSIAN_3TAP);
        assert!((out.get(2, 2) - 0.25).abs() < 1e-6);
        assert!((out.get(1, 2) - 0.125).abs() < 1e-6);
        let total: f32 = out.data.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }
}
