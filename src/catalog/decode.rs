use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    core::{FrameRGBA, FrameSize},
    error::{TryOnError, TryOnResult},
    math::premultiply_rgba8_in_place,
};

/// Decoded garment image in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl OverlayImage {
    /// Natural size.
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Build from straight RGBA8 pixels.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> TryOnResult<Self> {
        let expected = FrameSize::new(width, height).rgba8_len()?;
        if rgba.len() != expected || expected == 0 {
            return Err(TryOnError::validation(format!(
                "overlay pixels have {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }
}

/// Decode encoded image bytes into a premultiplied overlay.
pub fn decode_overlay(bytes: &[u8]) -> TryOnResult<OverlayImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode overlay image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    OverlayImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Decode encoded image bytes into a straight-alpha frame (used for still photos).
pub fn decode_frame(bytes: &[u8]) -> TryOnResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FrameRGBA {
        width,
        height,
        data: rgba.into_raw(),
        premultiplied: false,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/decode.rs"]
mod tests;
