pub mod buffer;

pub use self::buffer::ImageBuf;
