use super::traits::ImageView;
use crate::error::AnalysisError;

#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Check that the view is non-empty and that `data` covers every row.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.w == 0 || self.h == 0 {
            return Err(AnalysisError::EmptyImage);
        }
        let needed = (self.h - 1) * self.stride + self.w;
        if self.stride < self.w || self.data.len() < needed {
            return Err(AnalysisError::InvalidDimensions {
                w: self.w,
                h: self.h,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given tightly packed bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, AnalysisError> {
        if data.len() != width * height {
            return Err(AnalysisError::InvalidDimensions {
                w: width,
                h: height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}
