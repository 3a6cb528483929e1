//! Area-averaging resize (box filter with fractional pixel coverage).
use crate::edges::EdgeMap;
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Per destination index, the contributing source indices and their weights
/// (weights of one destination sample sum to 1).
fn axis_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = (d + 1) as f64 * scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-9).then_some((s, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

/// Resize to `nw × nh` by averaging the source area covered by each output pixel.
pub fn resize_area(src: &ImageF32, nw: usize, nh: usize) -> ImageF32 {
    let mut out = ImageF32::new(nw, nh);
    if src.is_empty() || nw == 0 || nh == 0 {
        return out;
    }
    let xw = axis_weights(src.w, nw);
    let yw = axis_weights(src.h, nh);
    for (dy, ys) in yw.iter().enumerate() {
        let dst = out.row_mut(dy);
        for &(sy, wy) in ys {
            let row = src.row(sy);
            for (d, xs) in dst.iter_mut().zip(&xw) {
                let acc: f32 = xs.iter().map(|&(sx, wx)| row[sx] * wx).sum();
                *d += acc * wy;
            }
        }
    }
    out
}

/// Area-downscale a binary mask; an output cell is an edge when any covered
/// source pixel is.
pub fn resize_mask_area(mask: &EdgeMap, nw: usize, nh: usize) -> EdgeMap {
    if mask.is_empty() || nw == 0 || nh == 0 {
        return EdgeMap::new(nw, nh);
    }
    let as_float = ImageF32::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.is_edge(x, y) {
            1.0
        } else {
            0.0
        }
    });
    let small = resize_area(&as_float, nw, nh);
    EdgeMap::from_fn(nw, nh, |x, y| small.get(x, y) > 1e-6)
}
