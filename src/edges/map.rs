use crate::error::AnalysisError;
use image::{GrayImage, Luma};

/// Binary edge mask in small-pixel space (`1` = edge, `0` = background).
///
/// Produced once per analysis pass and shared read-only by every structural
/// analyzer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

impl EdgeMap {
    /// All-background mask.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Wrap a row-major buffer; any nonzero byte is an edge.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self, AnalysisError> {
        if data.len() != w * h {
            return Err(AnalysisError::InvalidDimensions {
                w,
                h,
                len: data.len(),
            });
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self { w, h, data })
    }

    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut map = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if f(x, y) {
                    map.data[y * w + x] = 1;
                }
            }
        }
        map
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x < self.w && y < self.h && self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, edge: bool) {
        if x < self.w && y < self.h {
            self.data[y * self.w + x] = u8::from(edge);
        }
    }

    /// 8-bit rendering with edges at 255, the layout `imageproc` expects.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            Luma([if self.is_edge(x as usize, y as usize) {
                255
            } else {
                0
            }])
        })
    }

    /// Mask of the nonzero pixels of an 8-bit image.
    pub fn from_gray_image(image: &GrayImage) -> Self {
        let (w, h) = (image.width() as usize, image.height() as usize);
        let data = image.as_raw().iter().map(|&v| u8::from(v != 0)).collect();
        Self { w, h, data }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Iterate `(x, y)` of every edge pixel in row-major order.
    pub fn edge_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, _)| (i % w, i / w))
    }

    pub fn and(&self, other: &Self) -> Result<Self, AnalysisError> {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn or(&self, other: &Self) -> Result<Self, AnalysisError> {
        self.zip_with(other, |a, b| a | b)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(u8, u8) -> u8) -> Result<Self, AnalysisError> {
        if self.w != other.w || self.h != other.h {
            return Err(AnalysisError::SizeMismatch {
                left: (self.w, self.h),
                right: (other.w, other.h),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Self {
            w: self.w,
            h: self.h,
            data,
        })
    }

    /// Mirror left-right around the image center.
    pub fn flip_horizontal(&self) -> Self {
        let mut out = Self::new(self.w, self.h);
        for y in 0..self.h {
            let src = &self.data[y * self.w..(y + 1) * self.w];
            let dst = &mut out.data[y * self.w..(y + 1) * self.w];
            for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
                *d = *s;
            }
        }
        out
    }

    /// Shift columns by `k` (positive = right), wrapping around the border.
    pub fn roll_columns(&self, k: isize) -> Self {
        if self.w == 0 || k == 0 {
            return self.clone();
        }
        let shift = k.rem_euclid(self.w as isize) as usize;
        let mut out = Self::new(self.w, self.h);
        for y in 0..self.h {
            let src = &self.data[y * self.w..(y + 1) * self.w];
            let dst = &mut out.data[y * self.w..(y + 1) * self.w];
            for (x, &v) in src.iter().enumerate() {
                dst[(x + shift) % self.w] = v;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_wraps_columns() {
        let map = EdgeMap::from_fn(4, 1, |x, _| x == 3);
        let rolled = map.roll_columns(1);
        assert!(rolled.is_edge(0, 0));
        assert_eq!(rolled.count_nonzero(), 1);
        let back = map.roll_columns(-3);
        assert!(back.is_edge(0, 0));
    }

    #[test]
    fn flip_mirrors_rows() {
        let map = EdgeMap::from_fn(5, 2, |x, y| x == 1 && y == 1);
        let flipped = map.flip_horizontal();
        assert!(flipped.is_edge(3, 1));
        assert!(!flipped.is_edge(1, 1));
    }

    #[test]
    fn and_or_require_equal_sizes() {
        let a = EdgeMap::new(3, 3);
        let b = EdgeMap::new(4, 3);
        assert!(a.and(&b).is_err());
        assert!(a.or(&a).is_ok());
    }

    #[test]
    fn gray_image_conversion_keeps_edges() {
        let map = EdgeMap::from_fn(3, 2, |x, y| x == 2 && y == 0);
        let gray = map.to_gray_image();
        assert_eq!(gray.get_pixel(2, 0).0, [255]);
        assert_eq!(gray.get_pixel(0, 1).0, [0]);
        assert_eq!(EdgeMap::from_gray_image(&gray), map);
    }

    #[test]
    fn from_raw_binarizes() {
        let map = EdgeMap::from_raw(2, 2, vec![0, 255, 7, 0]).expect("valid");
        assert_eq!(map.as_slice(), &[0, 1, 1, 0]);
        let pixels: Vec<_> = map.edge_pixels().collect();
        assert_eq!(pixels, vec![(1, 0), (0, 1)]);
    }
}
