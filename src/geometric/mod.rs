//! Geometric image transforms.
//!
//! Convenience wrappers over the warp engines in [`warp`]: translation,
//! rotation about the image center, aspect-aware scaling, 3-point affine
//! and 4-point perspective warps, and four-corner rectification. All
//! operations return a new buffer with the input's channel count;
//! out-of-source samples read as black.
use crate::error::{Error, Result};
use crate::image::ImageBuf;
use log::debug;
use nalgebra::{Matrix2x3, Matrix3, SMatrix, SVector, Vector3};

pub mod warp;

pub use self::warp::{resize_bilinear, warp_affine, warp_perspective};

#[cfg(test)]
mod tests;

/// Determinant threshold below which a point triple counts as collinear.
const DEGENERACY_EPS: f32 = 1e-6;

/// Shift the image by (`tx`, `ty`) pixels on a same-sized canvas.
pub fn translate(img: &ImageBuf, tx: f32, ty: f32) -> Result<ImageBuf> {
    let m = Matrix2x3::new(1.0, 0.0, tx, 0.0, 1.0, ty);
    warp_affine(img, &m, img.width(), img.height())
}

/// Rotate the image by `degrees` (counter-clockwise) about its center on a
/// same-sized canvas.
pub fn rotate(img: &ImageBuf, degrees: f32) -> Result<ImageBuf> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let cx = img.width() as f32 / 2.0;
    let cy = img.height() as f32 / 2.0;
    let m = Matrix2x3::new(
        cos,
        sin,
        (1.0 - cos) * cx - sin * cy,
        -sin,
        cos,
        sin * cx + (1.0 - cos) * cy,
    );
    warp_affine(img, &m, img.width(), img.height())
}

/// Resize to `(width, height)`.
///
/// If exactly one target dimension is positive, the other is derived from
/// the input's aspect ratio. If neither is positive (or the derived
/// dimension truncates to zero), the input is returned unchanged.
pub fn scale(img: &ImageBuf, target: (i32, i32)) -> Result<ImageBuf> {
    let ratio = img.width() as f32 / img.height() as f32;
    let (mut sw, mut sh) = target;
    if sw > 0 && sh <= 0 {
        sh = (sw as f32 / ratio) as i32;
    } else if sw <= 0 && sh > 0 {
        sw = (sh as f32 * ratio) as i32;
    }
    if sw <= 0 || sh <= 0 {
        debug!("geometric::scale target {target:?} performs no scaling");
        return Ok(img.clone());
    }
    resize_bilinear(img, sw as usize, sh as usize)
}

/// Warp through the unique affine map taking `src[i]` to `dst[i]`, on a
/// canvas of the input's size. Collinear `src` points fail with
/// [`Error::ParameterOutOfRange`].
pub fn affine(img: &ImageBuf, src: &[[f32; 2]; 3], dst: &[[f32; 2]; 3]) -> Result<ImageBuf> {
    let m = solve_affine(src, dst)?;
    warp_affine(img, &m, img.width(), img.height())
}

/// Warp through the homography taking `src[i]` to `dst[i]`, on a canvas of
/// the input's size. Degenerate correspondences fail with
/// [`Error::ParameterOutOfRange`].
pub fn perspective(img: &ImageBuf, src: &[[f32; 2]; 4], dst: &[[f32; 2]; 4]) -> Result<ImageBuf> {
    let h = solve_homography(src, dst)?;
    warp_perspective(img, &h, img.width(), img.height())
}

/// Rectify the quadrilateral spanned by `points` (any order) onto an
/// upright rectangle sized by the quad's longest opposing edges.
pub fn rectify_quad(img: &ImageBuf, points: &[[f32; 2]; 4]) -> Result<ImageBuf> {
    let src = order_quad(points);
    let [tl, tr, br, bl] = src;

    // Bounding rectangle from the longer of each pair of opposing edges.
    let out_w = edge_len(tl, tr).max(edge_len(bl, br)) as usize;
    let out_h = edge_len(tl, bl).max(edge_len(tr, br)) as usize;
    if out_w == 0 || out_h == 0 {
        return Err(Error::ParameterOutOfRange(format!(
            "degenerate quad {points:?} spans no area"
        )));
    }
    debug!("geometric::rectify_quad {points:?} -> {out_w}x{out_h}");

    let wf = (out_w - 1) as f32;
    let hf = (out_h - 1) as f32;
    let dst = [[0.0, 0.0], [wf, 0.0], [wf, hf], [0.0, hf]];
    let h = solve_homography(&src, &dst)?;
    warp_perspective(img, &h, out_w, out_h)
}

/// Order four corner points clockwise as top-left, top-right,
/// bottom-right, bottom-left.
fn order_quad(points: &[[f32; 2]; 4]) -> [[f32; 2]; 4] {
    let mut sorted = *points;
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    let (left, right) = sorted.split_at_mut(2);
    left.sort_by(|a, b| a[1].total_cmp(&b[1]));
    right.sort_by(|a, b| a[1].total_cmp(&b[1]));
    [left[0], right[0], right[1], left[1]]
}

fn edge_len(p: [f32; 2], q: [f32; 2]) -> f32 {
    ((p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2)).sqrt()
}

/// Solve the 2×3 affine map from three point correspondences.
fn solve_affine(src: &[[f32; 2]; 3], dst: &[[f32; 2]; 3]) -> Result<Matrix2x3<f32>> {
    let a = Matrix3::new(
        src[0][0], src[0][1], 1.0, //
        src[1][0], src[1][1], 1.0, //
        src[2][0], src[2][1], 1.0,
    );
    if a.determinant().abs() <= DEGENERACY_EPS {
        return Err(Error::ParameterOutOfRange(format!(
            "collinear source points for affine transform: {src:?}"
        )));
    }
    let lu = a.lu();
    let degenerate = || {
        Error::ParameterOutOfRange(format!(
            "degenerate point correspondences for affine transform: {src:?} -> {dst:?}"
        ))
    };
    let row_x = lu
        .solve(&Vector3::new(dst[0][0], dst[1][0], dst[2][0]))
        .ok_or_else(degenerate)?;
    let row_y = lu
        .solve(&Vector3::new(dst[0][1], dst[1][1], dst[2][1]))
        .ok_or_else(degenerate)?;
    Ok(Matrix2x3::new(
        row_x[0], row_x[1], row_x[2], row_y[0], row_y[1], row_y[2],
    ))
}

/// Solve the homography from four point correspondences (direct linear
/// transform with h33 fixed to 1).
fn solve_homography(src: &[[f32; 2]; 4], dst: &[[f32; 2]; 4]) -> Result<Matrix3<f32>> {
    let mut a = SMatrix::<f32, 8, 8>::zeros();
    let mut b = SVector::<f32, 8>::zeros();
    for i in 0..4 {
        let [x, y] = src[i];
        let [u, v] = dst[i];
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -x * u;
        a[(r, 7)] = -y * u;
        b[r] = u;
        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -x * v;
        a[(r + 1, 7)] = -y * v;
        b[r + 1] = v;
    }
    let h = a.lu().solve(&b).ok_or_else(|| {
        Error::ParameterOutOfRange(format!(
            "degenerate point correspondences for perspective transform: {src:?} -> {dst:?}"
        ))
    })?;
    Ok(Matrix3::new(
        h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0,
    ))
}
