//! Synthetic noise injection.
//!
//! Purpose
//! - Corrupt an image with a parametrized noise model, returning a new
//!   equally-shaped buffer. Useful for augmenting training data and for
//!   stress-testing denoisers.
//!
//! Models
//! - [`NoiseModel::Gaussian`]: every sample gets an independent draw from
//!   `Normal(mean, std_dev)` added in f64, then the result is rounded and
//!   clipped back into [0, 255].
//! - [`NoiseModel::SaltAndPepper`]: `density` is the fraction of pixel
//!   *locations* to corrupt. Affected locations are distinct and chosen
//!   uniformly; each flips a fair coin between salt (255) and pepper (0),
//!   written to every channel of that pixel so corruption hits whole
//!   pixels, never single channels.
//!
//! Randomness
//! - [`apply`] takes an explicit `&mut impl Rng`, so a seeded
//!   `StdRng` makes synthesis reproducible. [`apply_default_rng`] draws
//!   from thread-local randomness for one-off use.
use crate::error::{Error, Result};
use crate::image::ImageBuf;
use log::debug;
use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// A noise model together with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum NoiseModel {
    /// Additive sensor noise drawn from `Normal(mean, std_dev)`.
    Gaussian { mean: f64, std_dev: f64 },
    /// Impulse noise replacing a fraction of pixels with 0 or 255.
    SaltAndPepper { density: f64 },
}

impl NoiseModel {
    pub fn gaussian(mean: f64, std_dev: f64) -> Self {
        Self::Gaussian { mean, std_dev }
    }

    pub fn salt_and_pepper(density: f64) -> Self {
        Self::SaltAndPepper { density }
    }

    /// Canonical model name, matching what [`FromStr`] accepts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gaussian { .. } => "gaussian",
            Self::SaltAndPepper { .. } => "salt-and-pepper",
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Gaussian { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() {
                    return Err(Error::ParameterOutOfRange(format!(
                        "gaussian parameters must be finite (mean={mean}, std_dev={std_dev})"
                    )));
                }
                if std_dev < 0.0 {
                    return Err(Error::ParameterOutOfRange(format!(
                        "gaussian std_dev must be non-negative, got {std_dev}"
                    )));
                }
            }
            Self::SaltAndPepper { density } => {
                if !density.is_finite() {
                    return Err(Error::ParameterOutOfRange(format!(
                        "salt-and-pepper density must be finite, got {density}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromStr for NoiseModel {
    type Err = Error;

    /// Parse a model name (case-insensitive) into the model with its
    /// documented defaults: `Gaussian { mean: 0, std_dev: 0 }`,
    /// `SaltAndPepper { density: 0 }`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Self::Gaussian {
                mean: 0.0,
                std_dev: 0.0,
            }),
            "salt-and-pepper" => Ok(Self::SaltAndPepper { density: 0.0 }),
            _ => Err(Error::UnsupportedModel(s.to_string())),
        }
    }
}

/// Apply `model` to `image` using the supplied random source.
///
/// The input is never mutated; the output has the same width, height and
/// channel count. Passing a seeded generator makes the result
/// deterministic.
pub fn apply<R: Rng + ?Sized>(image: &ImageBuf, model: NoiseModel, rng: &mut R) -> Result<ImageBuf> {
    model.validate()?;
    debug!(
        "noise::apply model={} on {}x{}x{}",
        model.name(),
        image.width(),
        image.height(),
        image.channels()
    );
    match model {
        NoiseModel::Gaussian { mean, std_dev } => gaussian(image, mean, std_dev, rng),
        NoiseModel::SaltAndPepper { density } => salt_and_pepper(image, density, rng),
    }
}

/// [`apply`] with thread-local randomness.
pub fn apply_default_rng(image: &ImageBuf, model: NoiseModel) -> Result<ImageBuf> {
    apply(image, model, &mut rand::thread_rng())
}

fn gaussian<R: Rng + ?Sized>(
    image: &ImageBuf,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<ImageBuf> {
    // Validation guarantees std_dev >= 0 and finite parameters.
    let normal = Normal::new(mean, std_dev).map_err(|e| {
        Error::ParameterOutOfRange(format!("normal distribution rejected parameters: {e}"))
    })?;
    let mut out = image.clone();
    for sample in out.data_mut() {
        let noisy = f64::from(*sample) + normal.sample(rng);
        *sample = noisy.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

fn salt_and_pepper<R: Rng + ?Sized>(image: &ImageBuf, density: f64, rng: &mut R) -> Result<ImageBuf> {
    // Out-of-range density clamps instead of failing.
    let density = density.clamp(0.0, 1.0);
    let total = image.pixel_count();
    let corrupt = (total as f64 * density) as usize;
    debug!("noise::salt_and_pepper corrupting {corrupt}/{total} pixels");

    let mut out = image.clone();
    let width = image.width();
    for location in index::sample(rng, total, corrupt) {
        let value = if rng.gen_bool(0.5) { 255 } else { 0 };
        let (x, y) = (location % width, location / width);
        out.pixel_mut(x, y).fill(value);
    }
    Ok(out)
}
