use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mid_gray(width: usize, height: usize, channels: usize) -> ImageBuf {
    ImageBuf::from_raw(width, height, channels, vec![128; width * height * channels]).unwrap()
}

#[test]
fn model_names_parse_case_insensitively() {
    assert_eq!(
        "Gaussian".parse::<NoiseModel>().unwrap(),
        NoiseModel::gaussian(0.0, 0.0)
    );
    assert_eq!(
        "SALT-AND-PEPPER".parse::<NoiseModel>().unwrap(),
        NoiseModel::salt_and_pepper(0.0)
    );
}

#[test]
fn unknown_model_name_is_rejected() {
    let err = "Poisson".parse::<NoiseModel>().unwrap_err();
    assert!(
        matches!(err, Error::UnsupportedModel(ref name) if name == "Poisson"),
        "unexpected error: {err}"
    );
}

#[test]
fn negative_std_dev_is_rejected() {
    let img = mid_gray(4, 4, 1);
    let err = apply(
        &img,
        NoiseModel::gaussian(0.0, -1.0),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ParameterOutOfRange(_)));
}

#[test]
fn non_finite_parameters_are_rejected() {
    let img = mid_gray(4, 4, 3);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(apply(&img, NoiseModel::gaussian(f64::NAN, 1.0), &mut rng).is_err());
    assert!(apply(&img, NoiseModel::salt_and_pepper(f64::INFINITY), &mut rng).is_err());
}

#[test]
fn zero_variance_gaussian_is_identity() {
    let img = mid_gray(4, 4, 3);
    let out = apply(
        &img,
        NoiseModel::gaussian(0.0, 0.0),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    assert_eq!(out, img);
}

#[test]
fn zero_density_salt_and_pepper_is_identity() {
    let img = mid_gray(5, 3, 4);
    let out = apply(
        &img,
        NoiseModel::salt_and_pepper(0.0),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    assert_eq!(out, img);
}

#[test]
fn out_of_range_density_is_clamped() {
    let img = mid_gray(8, 8, 3);
    let mut rng = StdRng::seed_from_u64(2);

    // Below zero behaves as zero.
    let untouched = apply(&img, NoiseModel::salt_and_pepper(-0.5), &mut rng).unwrap();
    assert_eq!(untouched, img);

    // Above one behaves as one: every pixel becomes pure salt or pepper.
    let saturated = apply(&img, NoiseModel::salt_and_pepper(2.0), &mut rng).unwrap();
    for y in 0..saturated.height() {
        for x in 0..saturated.width() {
            let px = saturated.pixel(x, y);
            assert!(
                px.iter().all(|&v| v == 0) || px.iter().all(|&v| v == 255),
                "pixel ({x},{y}) = {px:?} is neither salt nor pepper"
            );
        }
    }
}

#[test]
fn model_round_trips_through_json() {
    let model = NoiseModel::gaussian(2.5, 10.0);
    let json = serde_json::to_string(&model).unwrap();
    assert_eq!(serde_json::from_str::<NoiseModel>(&json).unwrap(), model);

    let parsed: NoiseModel =
        serde_json::from_str(r#"{"model":"salt-and-pepper","density":0.25}"#).unwrap();
    assert_eq!(parsed, NoiseModel::salt_and_pepper(0.25));
}
