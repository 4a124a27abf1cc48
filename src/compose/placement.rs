use crate::foundation::{
    core::{FrameSize, Rect},
    error::{TryOnError, TryOnResult},
};

/// Fixed-ratio garment placement over the upper torso.
///
/// Not a fitted garment: the rectangle depends only on the surface size and the overlay's
/// natural size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayPlacement {
    /// Overlay width as a fraction of surface width.
    pub width_ratio: f64,
    /// Top edge as a fraction of surface height.
    pub top_ratio: f64,
    /// Opacity applied on top of the overlay's own alpha.
    pub opacity: f32,
}

impl Default for OverlayPlacement {
    fn default() -> Self {
        Self {
            width_ratio: 0.6,
            top_ratio: 0.15,
            opacity: 0.8,
        }
    }
}

impl OverlayPlacement {
    /// Placement for compositing a garment onto a still photo.
    pub fn still() -> Self {
        Self {
            width_ratio: 0.55,
            top_ratio: 0.25,
            opacity: 1.0,
        }
    }

    /// Reject ratios outside `(0, 1]` / `[0, 1)` and opacity outside `[0, 1]`.
    pub fn validate(&self) -> TryOnResult<()> {
        if !(self.width_ratio > 0.0 && self.width_ratio <= 1.0) {
            return Err(TryOnError::validation(
                "placement width_ratio must be in (0, 1]",
            ));
        }
        if !(self.top_ratio >= 0.0 && self.top_ratio < 1.0) {
            return Err(TryOnError::validation(
                "placement top_ratio must be in [0, 1)",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(TryOnError::validation(
                "placement opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Overlay rectangle in surface coordinates, horizontally centered, aspect preserved.
    ///
    /// `None` when either size is empty.
    pub fn overlay_rect(&self, surface: FrameSize, natural: FrameSize) -> Option<Rect> {
        if surface.is_empty() || natural.is_empty() {
            return None;
        }
        let sw = f64::from(surface.width);
        let sh = f64::from(surface.height);
        let w = sw * self.width_ratio;
        let h = w * (f64::from(natural.height) / f64::from(natural.width));
        let x0 = (sw - w) / 2.0;
        let y0 = sh * self.top_ratio;
        Some(Rect::new(x0, y0, x0 + w, y0 + h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
