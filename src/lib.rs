#![doc = include_str!("../README.md")]

pub mod error;
pub mod geometric;
pub mod image;
pub mod io;
pub mod noise;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::image::ImageBuf;
pub use crate::noise::NoiseModel;

/// Small prelude for quick experiments.
///
/// ```
/// use cvtools::prelude::*;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// # fn main() {
/// let img = ImageBuf::from_raw(8, 8, 3, vec![200; 8 * 8 * 3]).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let noisy = cvtools::noise::apply(&img, NoiseModel::salt_and_pepper(0.1), &mut rng).unwrap();
/// assert_eq!(noisy.pixel_count(), img.pixel_count());
/// # }
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::ImageBuf;
    pub use crate::io::ReadMode;
    pub use crate::noise::NoiseModel;
}
