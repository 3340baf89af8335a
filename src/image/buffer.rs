//! Owned 8-bit image buffer in row-major layout.
//!
//! - 1 channel: grayscale.
//! - 3 channels: color, blue-green-red order.
//! - 4 channels: color with alpha, blue-green-red-alpha order.
//!
//! Buffers are only obtainable through validating constructors, so a held
//! `ImageBuf` always satisfies `data.len() == width * height * channels`
//! with nonzero dimensions and a supported channel count.
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuf {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl ImageBuf {
    /// Construct a zero-filled buffer of size `width × height × channels`.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        validate_shape(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        })
    }

    /// Construct a buffer from raw bytes, taking ownership of `data`.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        validate_shape(width, height, channels)?;
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "buffer length {} does not match {width}x{height}x{channels} = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel (1, 3 or 4)
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of pixel locations (`width * height`)
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn pixel_index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    /// All samples of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.pixel_index(x, y);
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.pixel_index(x, y);
        let channels = self.channels;
        &mut self.data[start..start + channels]
    }

    /// One full row of samples (`width * channels` bytes).
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width * self.channels;
        &self.data[start..start + self.width * self.channels]
    }
}

fn validate_shape(width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "zero-area image ({width}x{height})"
        )));
    }
    if !matches!(channels, 1 | 3 | 4) {
        return Err(Error::InvalidInput(format!(
            "unsupported channel count {channels} (expected 1, 3 or 4)"
        )));
    }
    Ok(())
}
