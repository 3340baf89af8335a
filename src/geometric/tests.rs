use super::*;
use approx::assert_relative_eq;

fn apply_affine(m: &Matrix2x3<f32>, p: [f32; 2]) -> [f32; 2] {
    [
        m[(0, 0)] * p[0] + m[(0, 1)] * p[1] + m[(0, 2)],
        m[(1, 0)] * p[0] + m[(1, 1)] * p[1] + m[(1, 2)],
    ]
}

fn apply_homography(h: &Matrix3<f32>, p: [f32; 2]) -> [f32; 2] {
    let v = h * Vector3::new(p[0], p[1], 1.0);
    [v[0] / v[2], v[1] / v[2]]
}

#[test]
fn solved_affine_maps_the_control_points() {
    let src = [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]];
    let dst = [[2.0, 3.0], [12.0, 4.0], [1.0, 14.0]];
    let m = solve_affine(&src, &dst).unwrap();
    for (s, d) in src.iter().zip(dst.iter()) {
        let mapped = apply_affine(&m, *s);
        assert_relative_eq!(mapped[0], d[0], epsilon = 1e-3);
        assert_relative_eq!(mapped[1], d[1], epsilon = 1e-3);
    }
}

#[test]
fn collinear_affine_points_are_rejected() {
    let src = [[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]];
    let dst = [[0.0, 0.0], [5.0, 0.0], [10.0, 0.0]];
    assert!(matches!(
        solve_affine(&src, &dst),
        Err(Error::ParameterOutOfRange(_))
    ));
}

#[test]
fn solved_homography_maps_the_control_points() {
    let src = [[0.0, 0.0], [20.0, 0.0], [20.0, 15.0], [0.0, 15.0]];
    let dst = [[1.0, 2.0], [18.0, 1.0], [21.0, 14.0], [-1.0, 16.0]];
    let h = solve_homography(&src, &dst).unwrap();
    for (s, d) in src.iter().zip(dst.iter()) {
        let mapped = apply_homography(&h, *s);
        assert_relative_eq!(mapped[0], d[0], epsilon = 1e-2);
        assert_relative_eq!(mapped[1], d[1], epsilon = 1e-2);
    }
}

#[test]
fn degenerate_homography_points_are_rejected() {
    // Three of four source points coincide.
    let src = [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [1.0, 1.0]];
    let dst = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    assert!(matches!(
        solve_homography(&src, &dst),
        Err(Error::ParameterOutOfRange(_))
    ));
}

#[test]
fn quad_corners_are_ordered_clockwise_from_top_left() {
    let shuffled = [[9.0, 7.0], [0.0, 0.0], [9.0, 0.0], [0.0, 7.0]];
    let ordered = order_quad(&shuffled);
    assert_eq!(
        ordered,
        [[0.0, 0.0], [9.0, 0.0], [9.0, 7.0], [0.0, 7.0]]
    );
}

#[test]
fn scale_derives_the_missing_dimension() {
    let img = ImageBuf::new(8, 4, 3).unwrap();
    let out = scale(&img, (16, 0)).unwrap();
    assert_eq!((out.width(), out.height()), (16, 8));

    let out = scale(&img, (0, 8)).unwrap();
    assert_eq!((out.width(), out.height()), (16, 8));

    let out = scale(&img, (-1, -1)).unwrap();
    assert_eq!(out, img);
}
