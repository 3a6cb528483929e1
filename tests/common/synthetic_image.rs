use composition_coach::edges::EdgeMap;

/// Uniform gray image.
pub fn flat_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    vec![value; width * height]
}

/// Dark sky over a bright ground, split at `split_row`.
pub fn horizon_step_u8(width: usize, height: usize, split_row: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(split_row < height, "split row must lie inside the image");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        let val = if y < split_row { 40u8 } else { 200u8 };
        img[y * width..(y + 1) * width].fill(val);
    }
    img
}

/// Edge mask containing one-pixel lines between the given endpoints.
pub fn line_mask(width: usize, height: usize, lines: &[[f32; 4]]) -> EdgeMap {
    let mut mask = EdgeMap::new(width, height);
    for &[x1, y1, x2, y2] in lines {
        let steps = (x2 - x1).abs().max((y2 - y1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (x1 + t * (x2 - x1)).round();
            let y = (y1 + t * (y2 - y1)).round();
            if x >= 0.0 && y >= 0.0 {
                mask.set(x as usize, y as usize, true);
            }
        }
    }
    mask
}
