//! Hough-based line-segment detection over a binary edge mask.
//!
//! Pipeline
//! - Voting and peak suppression: `imageproc::hough::detect_lines` on the
//!   mask rendered as an 8-bit image, yielding `(r, θ)` polar lines.
//! - Ranking: each line is traced across the frame and scored by the edge
//!   pixels it passes through; strongest first, capped at `max_lines`.
//! - Walking: the line is stepped one pixel at a time along its major axis
//!   (±1 pixel tolerance across it). Edge hits are grouped into runs,
//!   bridging gaps up to `max_line_gap`; runs of at least `min_line_length`
//!   become segments.
//! - Consumption: pixels of an emitted segment are marked used, so weaker
//!   neighbouring lines cannot report the same structure twice.
//!
//! Endpoints are integer pixel positions of the first and last hit.

mod options;

pub use options::HoughOptions;

use crate::edges::EdgeMap;
use crate::types::LineSegment;
use imageproc::hough::{detect_lines, PolarLine};
use log::trace;

/// Detect line segments on `edges`.
pub fn detect_segments(edges: &EdgeMap, opts: &HoughOptions) -> Vec<LineSegment> {
    if edges.is_empty() || edges.count_nonzero() == 0 {
        return Vec::new();
    }

    let lines = detect_lines(&edges.to_gray_image(), opts.detection());
    trace!("hough: {} lines above {} votes", lines.len(), opts.vote_threshold);

    let mut walker = LineWalker {
        edges,
        used: vec![false; edges.width() * edges.height()],
        opts,
        segments: Vec::new(),
    };
    let mut paths: Vec<(usize, LinePath)> = lines
        .iter()
        .filter_map(|line| LinePath::trace(line, edges.width(), edges.height()))
        .map(|path| (walker.support(&path), path))
        .collect();
    // Stable, so equal support keeps the accumulator's (θ, r) order.
    paths.sort_by(|a, b| b.0.cmp(&a.0));
    paths.truncate(opts.max_lines);

    for (_, path) in &paths {
        walker.walk(path);
    }
    walker.segments
}

/// Pixel positions visited when stepping a polar line across the frame.
struct LinePath {
    samples: Vec<(usize, usize)>,
    x_major: bool,
}

impl LinePath {
    fn trace(line: &PolarLine, w: usize, h: usize) -> Option<Self> {
        let (wf, hf) = (w as f32, h as f32);
        // The accumulator truncates r toward zero; walk the bin center.
        let rho = if line.r == 0.0 {
            0.0
        } else {
            line.r + 0.5 * line.r.signum()
        };
        let (sin_t, cos_t) = (line.angle_in_degrees as f32).to_radians().sin_cos();
        // Foot of the perpendicular from the origin, and the line direction.
        let (px, py) = (rho * cos_t, rho * sin_t);
        let (dx, dy) = (-sin_t, cos_t);

        let (t0, t1) = clip_interval(px, dx, wf - 1.0)
            .and_then(|(a, b)| clip_interval(py, dy, hf - 1.0).map(|(c, d)| (a.max(c), b.min(d))))
            .filter(|(a, b)| a <= b)?;

        let step = 1.0 / dx.abs().max(dy.abs());
        let steps = ((t1 - t0) / step).floor() as usize;
        let samples = (0..=steps)
            .filter_map(|i| {
                let t = t0 + i as f32 * step;
                let x = (px + t * dx).round();
                let y = (py + t * dy).round();
                (x >= 0.0 && y >= 0.0 && x < wf && y < hf).then_some((x as usize, y as usize))
            })
            .collect();
        Some(Self {
            samples,
            x_major: dx.abs() >= dy.abs(),
        })
    }
}

struct LineWalker<'a> {
    edges: &'a EdgeMap,
    used: Vec<bool>,
    opts: &'a HoughOptions,
    segments: Vec<LineSegment>,
}

impl LineWalker<'_> {
    /// Number of steps along `path` that land on an unused edge pixel.
    fn support(&self, path: &LinePath) -> usize {
        path.samples
            .iter()
            .filter(|&&(x, y)| self.hit(x, y, path.x_major).is_some())
            .count()
    }

    fn walk(&mut self, path: &LinePath) {
        let max_gap = self.opts.max_line_gap.max(0.0).round() as usize;
        let mut run: Vec<(usize, usize)> = Vec::new();
        let mut gap = 0usize;
        for &(x, y) in &path.samples {
            match self.hit(x, y, path.x_major) {
                Some(p) => {
                    run.push(p);
                    gap = 0;
                }
                None => {
                    gap += 1;
                    if gap > max_gap && !run.is_empty() {
                        self.close_run(&mut run);
                    }
                }
            }
        }
        if !run.is_empty() {
            self.close_run(&mut run);
        }
    }

    /// Unused edge pixel at `(x, y)` or one pixel across the line.
    fn hit(&self, x: usize, y: usize, x_major: bool) -> Option<(usize, usize)> {
        let w = self.edges.width();
        let (x, y) = (x as isize, y as isize);
        let candidates = if x_major {
            [(x, y), (x, y - 1), (x, y + 1)]
        } else {
            [(x, y), (x - 1, y), (x + 1, y)]
        };
        candidates.into_iter().find_map(|(cx, cy)| {
            if cx < 0 || cy < 0 {
                return None;
            }
            let (cx, cy) = (cx as usize, cy as usize);
            (self.edges.is_edge(cx, cy) && !self.used[cy * w + cx]).then_some((cx, cy))
        })
    }

    fn close_run(&mut self, run: &mut Vec<(usize, usize)>) {
        if let (Some(&first), Some(&last)) = (run.first(), run.last()) {
            let seg = LineSegment::new(
                first.0 as f32,
                first.1 as f32,
                last.0 as f32,
                last.1 as f32,
            );
            if seg.length() >= self.opts.min_line_length {
                let w = self.edges.width();
                for &(x, y) in run.iter() {
                    self.used[y * w + x] = true;
                }
                self.segments.push(seg);
            }
        }
        run.clear();
    }
}

/// Parameter range `t` for which `origin + t * dir` stays within `[0, max]`.
fn clip_interval(origin: f32, dir: f32, max: f32) -> Option<(f32, f32)> {
    if dir.abs() < 1e-6 {
        return (origin >= -0.5 && origin <= max + 0.5)
            .then_some((f32::NEG_INFINITY, f32::INFINITY));
    }
    let a = (0.0 - origin) / dir;
    let b = (max - origin) / dir;
    Some((a.min(b), a.max(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_becomes_one_segment() {
        let edges = EdgeMap::from_fn(120, 80, |x, y| y == 30 && (10..110).contains(&x));
        let segs = detect_segments(&edges, &HoughOptions::default());
        assert_eq!(segs.len(), 1, "segments: {segs:?}");
        let s = segs[0];
        assert!((s.y1 - 30.0).abs() < 0.5 && (s.y2 - 30.0).abs() < 0.5);
        assert!((s.length() - 99.0).abs() < 1.5, "length {}", s.length());
    }

    #[test]
    fn vertical_line_is_walked_along_rows() {
        let edges = EdgeMap::from_fn(120, 200, |x, y| x == 60 && (10..190).contains(&y));
        let segs = detect_segments(&edges, &HoughOptions::default());
        assert_eq!(segs.len(), 1, "segments: {segs:?}");
        let s = segs[0];
        assert_eq!((s.x1, s.x2), (60.0, 60.0));
        assert!((s.length() - 179.0).abs() < 1.5, "length {}", s.length());
    }

    #[test]
    fn gaps_split_segments() {
        let edges = EdgeMap::from_fn(200, 40, |x, y| y == 20 && (x < 80 || x >= 120));
        let opts = HoughOptions {
            max_line_gap: 5.0,
            ..HoughOptions::default()
        };
        let segs = detect_segments(&edges, &opts);
        assert_eq!(segs.len(), 2, "segments: {segs:?}");
    }

    #[test]
    fn short_or_sparse_structure_is_ignored() {
        let edges = EdgeMap::from_fn(100, 100, |x, y| y == 50 && x < 20);
        assert!(detect_segments(&edges, &HoughOptions::default()).is_empty());
        assert!(detect_segments(&EdgeMap::new(64, 64), &HoughOptions::default()).is_empty());
    }

    #[test]
    fn diagonal_line_is_recovered() {
        let edges = EdgeMap::from_fn(100, 100, |x, y| x == y && (10..90).contains(&x));
        let segs = detect_segments(&edges, &HoughOptions::default());
        assert!(!segs.is_empty());
        let longest = segs
            .iter()
            .max_by(|a, b| a.length().total_cmp(&b.length()))
            .copied()
            .expect("one segment");
        assert!(longest.length() > 100.0, "length {}", longest.length());
        assert!((longest.abs_sin() - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.05);
    }

    #[test]
    fn bin_center_compensates_truncated_radius() {
        let path = LinePath::trace(
            &PolarLine {
                r: 29.0,
                angle_in_degrees: 90,
            },
            50,
            40,
        )
        .expect("line crosses the frame");
        assert!(path.x_major);
        assert!(path.samples.iter().all(|&(_, y)| y == 29 || y == 30));
        assert!(path.samples.len() >= 49, "samples {}", path.samples.len());
    }
}
