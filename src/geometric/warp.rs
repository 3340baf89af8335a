//! Inverse-mapping warp engines with bilinear sampling.
//!
//! Both engines take a forward map (source → destination), invert it once,
//! and walk the output buffer pulling samples from the input. Samples that
//! fall outside the source read as 0 (constant black border).
use crate::error::{Error, Result};
use crate::image::ImageBuf;
use nalgebra::{Matrix2x3, Matrix3, Vector3};

const EPS: f32 = 1e-9;

/// Warp `img` through the affine map `m` into a `out_w × out_h` canvas.
pub fn warp_affine(
    img: &ImageBuf,
    m: &Matrix2x3<f32>,
    out_w: usize,
    out_h: usize,
) -> Result<ImageBuf> {
    let full = Matrix3::new(
        m[(0, 0)],
        m[(0, 1)],
        m[(0, 2)],
        m[(1, 0)],
        m[(1, 1)],
        m[(1, 2)],
        0.0,
        0.0,
        1.0,
    );
    let inv = full
        .try_inverse()
        .ok_or_else(|| Error::ParameterOutOfRange("affine map is not invertible".to_string()))?;

    let mut out = ImageBuf::new(out_w, out_h, img.channels())?;
    for y in 0..out_h {
        for x in 0..out_w {
            let sx = inv[(0, 0)] * x as f32 + inv[(0, 1)] * y as f32 + inv[(0, 2)];
            let sy = inv[(1, 0)] * x as f32 + inv[(1, 1)] * y as f32 + inv[(1, 2)];
            sample_bilinear(img, sx, sy, out.pixel_mut(x, y));
        }
    }
    Ok(out)
}

/// Warp `img` through the homography `h` into a `out_w × out_h` canvas.
pub fn warp_perspective(
    img: &ImageBuf,
    h: &Matrix3<f32>,
    out_w: usize,
    out_h: usize,
) -> Result<ImageBuf> {
    let inv = h.try_inverse().ok_or_else(|| {
        Error::ParameterOutOfRange("perspective map is not invertible".to_string())
    })?;

    let mut out = ImageBuf::new(out_w, out_h, img.channels())?;
    for y in 0..out_h {
        for x in 0..out_w {
            let v = inv * Vector3::new(x as f32, y as f32, 1.0);
            let w = v[2];
            if !w.is_finite() || w.abs() <= EPS {
                continue; // point at infinity, border stays black
            }
            sample_bilinear(img, v[0] / w, v[1] / w, out.pixel_mut(x, y));
        }
    }
    Ok(out)
}

/// Bilinear resize with edge-replicated sampling, center-aligned like the
/// usual codec resamplers.
pub fn resize_bilinear(img: &ImageBuf, out_w: usize, out_h: usize) -> Result<ImageBuf> {
    let scale_x = img.width() as f32 / out_w as f32;
    let scale_y = img.height() as f32 / out_h as f32;
    let max_x = (img.width() - 1) as f32;
    let max_y = (img.height() - 1) as f32;

    let mut out = ImageBuf::new(out_w, out_h, img.channels())?;
    for y in 0..out_h {
        let sy = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
        for x in 0..out_w {
            let sx = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
            sample_bilinear(img, sx, sy, out.pixel_mut(x, y));
        }
    }
    Ok(out)
}

/// Write the bilinear sample at (`x`, `y`) into `out_px`. Neighbors outside
/// the source contribute 0.
fn sample_bilinear(img: &ImageBuf, x: f32, y: f32, out_px: &mut [u8]) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    let x0f = x.floor();
    let y0f = y.floor();
    let fx = x - x0f;
    let fy = y - y0f;
    let x0 = x0f as i64;
    let y0 = y0f as i64;

    let corners = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];
    for (channel, out_sample) in out_px.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for &(cx, cy, weight) in &corners {
            if weight == 0.0 {
                continue;
            }
            if let Some(px) = fetch(img, cx, cy) {
                acc += weight * f32::from(px[channel]);
            }
        }
        *out_sample = acc.round().clamp(0.0, 255.0) as u8;
    }
}

#[inline]
fn fetch(img: &ImageBuf, x: i64, y: i64) -> Option<&[u8]> {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return None;
    }
    Some(img.pixel(x as usize, y as usize))
}
