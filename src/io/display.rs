//! Windowed image display on top of SDL2 (cargo feature `display`).
use crate::error::{Error, Result};
use crate::image::ImageBuf;
use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

/// Show `img` in a titled window and block until the user dismisses it
/// (window close, Escape, or Q).
pub fn show(img: &ImageBuf, title: &str) -> Result<()> {
    let width = img.width() as u32;
    let height = img.height() as u32;
    let staging = to_bgr24(img);

    let sdl = sdl2::init().map_err(Error::Display)?;
    let video = sdl.video().map_err(Error::Display)?;
    let window = video
        .window(title, width, height)
        .position_centered()
        .build()
        .map_err(|e| Error::Display(format!("failed to create window: {e}")))?;
    let mut canvas = window
        .into_canvas()
        .build()
        .map_err(|e| Error::Display(format!("failed to create canvas: {e}")))?;
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(PixelFormatEnum::BGR24, width, height)
        .map_err(|e| Error::Display(format!("failed to create texture: {e}")))?;
    texture
        .update(None, &staging, img.width() * 3)
        .map_err(|e| Error::Display(format!("failed to upload texture: {e}")))?;

    let mut event_pump = sdl.event_pump().map_err(Error::Display)?;
    let present = |canvas: &mut sdl2::render::WindowCanvas| -> Result<()> {
        canvas.clear();
        canvas
            .copy(&texture, None, None)
            .map_err(Error::Display)?;
        canvas.present();
        Ok(())
    };
    present(&mut canvas)?;

    debug!("io::show `{title}` {width}x{height}, waiting for dismissal");
    loop {
        match event_pump.wait_event() {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape | Keycode::Q),
                ..
            } => return Ok(()),
            // Redraw after expose/resize so the image survives occlusion.
            Event::Window { .. } => present(&mut canvas)?,
            _ => {}
        }
    }
}

/// Flatten any supported buffer into tightly packed BGR24 for the texture.
/// Alpha is ignored for display purposes.
fn to_bgr24(img: &ImageBuf) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.pixel_count() * 3);
    match img.channels() {
        1 => {
            for &v in img.data() {
                out.extend_from_slice(&[v, v, v]);
            }
        }
        3 => out.extend_from_slice(img.data()),
        _ => {
            for px in img.data().chunks_exact(4) {
                out.extend_from_slice(&px[..3]);
            }
        }
    }
    out
}
