#![allow(dead_code)]

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let sum = cx + cy;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Single-value image.
pub fn uniform_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Columns `< split_x` hold `left`, the rest `right`.
pub fn split_halves_u8(width: usize, height: usize, split_x: usize, left: u8, right: u8) -> Vec<u8> {
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            img[y * width + x] = if x < split_x { left } else { right };
        }
    }
    img
}

/// Row `y` holds `(y + 1) * step` across the whole row.
pub fn row_gradient_u8(width: usize, height: usize, step: u8) -> Vec<u8> {
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        let v = ((y + 1) * step as usize).min(255) as u8;
        img[y * width..(y + 1) * width].fill(v);
    }
    img
}
