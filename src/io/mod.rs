//! Image read/write helpers.
//!
//! - [`read`]: load from a filesystem path, or fetch and decode from an
//!   HTTP(S) URL when the path does not exist on disk.
//! - [`decode`]: decode an in-memory byte slice.
//! - [`write`]: encode to a file, format chosen from the extension.
//! - [`show`] (cargo feature `display`): render in a titled window and
//!   block until the user dismisses it.
//!
//! Decoding and encoding delegate to the `image` crate. Decoded RGB(A)
//! data is re-ordered into the crate's BGR(A) convention on the way in and
//! restored on the way out.
use crate::error::{Error, Result};
use crate::image::ImageBuf;
use image::{DynamicImage, ImageReader};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use self::display::show;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Channel handling for [`read`] and [`decode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// Force three channels, dropping alpha if present.
    Color,
    /// Force a single grayscale channel.
    Grayscale,
    /// Keep the decoded channel count (alpha preserved).
    #[default]
    Unchanged,
}

/// Read an image from a file path or a URL.
///
/// If `source` names an existing file it is decoded from disk; otherwise
/// it is treated as a URL, fetched with a bounded timeout, and decoded
/// from memory.
pub fn read(source: &str, mode: ReadMode) -> Result<ImageBuf> {
    let path = Path::new(source);
    if path.exists() {
        debug!("io::read decoding file {}", path.display());
        let decoded = image::open(path).map_err(Error::Decode)?;
        return from_dynamic(decoded, mode);
    }
    let bytes = fetch(source)?;
    debug!("io::read fetched {} bytes from {source}", bytes.len());
    decode(&bytes, mode)
}

/// Decode an image from raw encoded bytes, guessing the format.
pub fn decode(bytes: &[u8], mode: ReadMode) -> Result<ImageBuf> {
    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Decode(image::ImageError::IoError(e)))?
        .decode()
        .map_err(Error::Decode)?;
    from_dynamic(decoded, mode)
}

/// Write an image to `path`, creating missing parent directories.
///
/// The target format is inferred from the file extension by the codec.
pub fn write(path: &Path, img: &ImageBuf) -> Result<()> {
    ensure_parent_dir(path)?;
    let width = img.width() as u32;
    let height = img.height() as u32;
    let mut data = img.data().to_vec();
    swap_red_blue(&mut data, img.channels());

    let dynamic = match img.channels() {
        1 => image::GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        3 => image::RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        _ => image::RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
    }
    .ok_or_else(|| Error::InvalidInput("buffer does not match its declared shape".to_string()))?;

    dynamic.save(path).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        source: e,
    })
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let wrap = |source: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(wrap)?;
    let response = client.get(url).send().and_then(|r| r.error_for_status()).map_err(wrap)?;
    let bytes = response.bytes().map_err(wrap)?;
    Ok(bytes.to_vec())
}

fn from_dynamic(decoded: DynamicImage, mode: ReadMode) -> Result<ImageBuf> {
    let keep_alpha = decoded.color().has_alpha();
    let (channels, mut data, width, height) = match mode {
        ReadMode::Grayscale => {
            let gray = decoded.into_luma8();
            let (w, h) = gray.dimensions();
            (1, gray.into_raw(), w, h)
        }
        ReadMode::Color => {
            let rgb = decoded.into_rgb8();
            let (w, h) = rgb.dimensions();
            (3, rgb.into_raw(), w, h)
        }
        ReadMode::Unchanged if decoded.color().channel_count() == 1 => {
            let gray = decoded.into_luma8();
            let (w, h) = gray.dimensions();
            (1, gray.into_raw(), w, h)
        }
        ReadMode::Unchanged if keep_alpha => {
            let rgba = decoded.into_rgba8();
            let (w, h) = rgba.dimensions();
            (4, rgba.into_raw(), w, h)
        }
        ReadMode::Unchanged => {
            let rgb = decoded.into_rgb8();
            let (w, h) = rgb.dimensions();
            (3, rgb.into_raw(), w, h)
        }
    };
    swap_red_blue(&mut data, channels);
    ImageBuf::from_raw(width as usize, height as usize, channels, data)
}

/// Swap the R and B samples of every pixel in place. No-op for grayscale.
fn swap_red_blue(data: &mut [u8], channels: usize) {
    if channels < 3 {
        return;
    }
    for px in data.chunks_exact_mut(channels) {
        px.swap(0, 2);
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(())
}
