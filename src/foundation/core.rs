use std::time::Duration;

use crate::foundation::error::{TryOnError, TryOnResult};

pub use kurbo::Rect;

/// Pixel dimensions of a camera frame or output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Build a size; zero dimensions are allowed and reported by [`FrameSize::is_empty`].
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> TryOnResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| TryOnError::evaluation("frame buffer size overflow"))
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rational frames-per-second used by the display clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validated constructor.
    pub fn new(num: u32, den: u32) -> TryOnResult<Self> {
        if den == 0 {
            return Err(TryOnError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TryOnError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Wall-clock duration of one frame.
    pub fn frame_duration(self) -> Duration {
        Duration::from_secs_f64(f64::from(self.den) / f64::from(self.num))
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Row-major RGBA8 pixel buffer.
///
/// Camera frames arrive straight (not premultiplied); the compositor's output surface is
/// premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
    /// Whether `data` holds premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha frame filled with a single color.
    pub fn solid(size: FrameSize, rgba: [u8; 4]) -> TryOnResult<Self> {
        let len = size.rgba8_len()?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width: size.width,
            height: size.height,
            data,
            premultiplied: false,
        })
    }

    /// Dimensions of this frame.
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Check that `data` matches `width * height * 4`.
    pub fn validate(&self) -> TryOnResult<()> {
        let expected = self.size().rgba8_len()?;
        if self.data.len() != expected {
            return Err(TryOnError::evaluation(format!(
                "frame data has {} bytes, expected {expected} for {}",
                self.data.len(),
                self.size()
            )));
        }
        Ok(())
    }

    /// Pixel at `(x, y)`; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
