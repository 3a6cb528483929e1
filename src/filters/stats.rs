use crate::image::{ImageF32, ImageView};

/// Location and value of a global maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaxLocation {
    pub x: usize,
    pub y: usize,
    pub value: f32,
}

/// First global maximum in row-major order; `None` for empty images.
pub fn max_location(img: &ImageF32) -> Option<MaxLocation> {
    let mut best: Option<MaxLocation> = None;
    for (y, row) in img.rows().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if best.map_or(true, |b| value > b.value) {
                best = Some(MaxLocation { x, y, value });
            }
        }
    }
    best
}

/// Arithmetic mean over all pixels (0 for empty images).
pub fn mean(img: &ImageF32) -> f32 {
    let n = img.w * img.h;
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = img
        .rows()
        .map(|row| row.iter().map(|&v| v as f64).sum::<f64>())
        .sum();
    (sum / n as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_maximum_wins_ties() {
        let img = ImageF32::from_fn(4, 3, |x, y| {
            if (x, y) == (2, 0) || (x, y) == (1, 2) {
                5.0
            } else {
                1.0
            }
        });
        let m = max_location(&img).expect("non-empty");
        assert_eq!((m.x, m.y, m.value), (2, 0, 5.0));
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&ImageF32::new(0, 0)), 0.0);
        assert!(max_location(&ImageF32::new(0, 3)).is_none());
        let img = ImageF32::from_fn(2, 2, |x, _| x as f32);
        assert!((mean(&img) - 0.5).abs() < 1e-6);
    }
}
