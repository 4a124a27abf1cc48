use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::{
    core::FrameRGBA,
    error::{TryOnError, TryOnResult},
    math::unpremultiply_rgba8_in_place,
};

/// Default download name for exported frames.
pub const SNAPSHOT_FILE_NAME: &str = "aura-live-tryon.png";

/// One exported composite frame, PNG-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Suggested file name.
    pub file_name: String,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

impl Snapshot {
    /// Encode `surface` under `file_name`.
    pub fn encode(file_name: &str, surface: &FrameRGBA) -> TryOnResult<Self> {
        Ok(Self {
            file_name: file_name.to_string(),
            width: surface.width,
            height: surface.height,
            png: encode_png(surface)?,
        })
    }

    /// Write the PNG as `dir/<file_name>` and return the path.
    pub fn write_to_dir(&self, dir: &Path) -> TryOnResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create snapshot dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png)
            .with_context(|| format!("write snapshot '{}'", path.display()))?;
        Ok(path)
    }

    /// Decode the PNG back into straight RGBA8.
    pub fn decode(&self) -> TryOnResult<FrameRGBA> {
        crate::catalog::decode::decode_frame(&self.png)
    }
}

/// Encode a frame as PNG, converting premultiplied pixels to straight alpha first.
pub fn encode_png(frame: &FrameRGBA) -> TryOnResult<Vec<u8>> {
    frame.validate()?;
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| TryOnError::evaluation("frame buffer does not match its size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/snapshot.rs"]
mod tests;
