use cvtools::ImageBuf;

/// Solid-color image with every channel of every pixel set to `value`.
pub fn solid(width: usize, height: usize, channels: usize, value: u8) -> ImageBuf {
    ImageBuf::from_raw(width, height, channels, vec![value; width * height * channels])
        .expect("valid solid image shape")
}

/// Grayscale horizontal ramp: pixel (x, y) holds `(x * 255) / (width - 1)`.
pub fn gradient_gray(width: usize, height: usize) -> ImageBuf {
    assert!(width > 1, "gradient needs at least two columns");
    let mut data = Vec::with_capacity(width * height);
    for _y in 0..height {
        for x in 0..width {
            data.push((x * 255 / (width - 1)) as u8);
        }
    }
    ImageBuf::from_raw(width, height, 1, data).expect("valid gradient shape")
}

/// High-contrast checkerboard in three channels.
pub fn checkerboard_bgr(width: usize, height: usize, cell: usize) -> ImageBuf {
    assert!(cell > 0, "cell size must be positive");
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let val = if (x / cell + y / cell) & 1 == 0 { 32u8 } else { 220u8 };
            data.extend_from_slice(&[val, val, val]);
        }
    }
    ImageBuf::from_raw(width, height, 3, data).expect("valid checkerboard shape")
}
