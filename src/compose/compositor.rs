use std::sync::Arc;

use crate::{
    catalog::decode::OverlayImage,
    compose::{
        composite::{Blit, blit_over},
        placement::OverlayPlacement,
    },
    foundation::{
        core::{FrameRGBA, FrameSize, Rect},
        error::{TryOnError, TryOnResult},
        math::premultiply_rgba8_in_place,
    },
};

/// What one [`FrameCompositor::draw`] call produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawReport {
    /// Output surface size, always equal to the camera frame's size.
    pub size: FrameSize,
    /// Overlay rectangle in surface coordinates, when an overlay was drawn.
    pub overlay: Option<Rect>,
}

struct ScaledOverlay {
    source: Arc<OverlayImage>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Per-frame drawing: camera frame first, then the garment overlay on top.
///
/// Owns the presentable output surface (premultiplied RGBA8). The scaled overlay is memoized by
/// source image and target size only, so output stays a pure function of the inputs.
pub struct FrameCompositor {
    placement: OverlayPlacement,
    mirror: bool,
    surface: Option<FrameRGBA>,
    scaled: Option<ScaledOverlay>,
    frames_drawn: u64,
}

impl FrameCompositor {
    /// New compositor with no surface yet.
    pub fn new(placement: OverlayPlacement, mirror: bool) -> Self {
        Self {
            placement,
            mirror,
            surface: None,
            scaled: None,
            frames_drawn: 0,
        }
    }

    /// Placement used for overlays.
    pub fn placement(&self) -> OverlayPlacement {
        self.placement
    }

    /// Last composited output, `None` before the first draw.
    pub fn surface(&self) -> Option<&FrameRGBA> {
        self.surface.as_ref()
    }

    /// Frames drawn since construction or the last [`FrameCompositor::reset`].
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Forget the current surface so a restarted stream cannot export a stale frame.
    pub fn reset(&mut self) {
        self.surface = None;
        self.frames_drawn = 0;
    }

    /// Draw `frame` and, when given, `overlay` at the configured placement.
    pub fn draw(
        &mut self,
        frame: &FrameRGBA,
        overlay: Option<&Arc<OverlayImage>>,
    ) -> TryOnResult<DrawReport> {
        frame.validate()?;
        let size = frame.size();
        if size.is_empty() {
            return Err(TryOnError::evaluation("camera frame has zero size"));
        }

        let surface = match self.surface.take() {
            Some(s) if s.size() == size => s,
            prev => {
                if let Some(prev) = prev {
                    tracing::debug!(from = %prev.size(), to = %size, "output surface resized");
                }
                FrameRGBA {
                    width: size.width,
                    height: size.height,
                    data: vec![0u8; size.rgba8_len()?],
                    premultiplied: true,
                }
            }
        };
        let surface = self.surface.insert(surface);

        copy_frame(&mut surface.data, frame, self.mirror);

        let mut drawn_rect = None;
        if let Some(img) = overlay
            && let Some(rect) = self.placement.overlay_rect(size, img.size())
        {
            let left = rect.x0.round() as i64;
            let top = rect.y0.round() as i64;
            let width = (rect.x1.round() - rect.x0.round()).max(0.0) as u32;
            let height = (rect.y1.round() - rect.y0.round()).max(0.0) as u32;

            if width > 0 && height > 0 {
                let scaled = scaled_overlay(&mut self.scaled, img, width, height)?;
                if blit_over(
                    &mut surface.data,
                    size.width,
                    size.height,
                    Blit {
                        src: &scaled.pixels,
                        src_w: scaled.width,
                        src_h: scaled.height,
                        left,
                        top,
                        opacity: self.placement.opacity,
                    },
                )
                .is_some()
                {
                    drawn_rect = Some(rect);
                }
            }
        }

        self.frames_drawn += 1;
        Ok(DrawReport {
            size,
            overlay: drawn_rect,
        })
    }
}

fn copy_frame(dst: &mut [u8], frame: &FrameRGBA, mirror: bool) {
    if mirror {
        let row_len = frame.width as usize * 4;
        for (dst_row, src_row) in dst
            .chunks_exact_mut(row_len)
            .zip(frame.data.chunks_exact(row_len))
        {
            for (d, s) in dst_row
                .chunks_exact_mut(4)
                .zip(src_row.chunks_exact(4).rev())
            {
                d.copy_from_slice(s);
            }
        }
    } else {
        dst.copy_from_slice(&frame.data);
    }
    if !frame.premultiplied {
        premultiply_rgba8_in_place(dst);
    }
}

fn scaled_overlay<'a>(
    cache: &'a mut Option<ScaledOverlay>,
    img: &Arc<OverlayImage>,
    width: u32,
    height: u32,
) -> TryOnResult<&'a ScaledOverlay> {
    let hit = cache.as_ref().is_some_and(|c| {
        Arc::ptr_eq(&c.source, img) && c.width == width && c.height == height
    });
    if !hit {
        let pixels = if img.width == width && img.height == height {
            img.rgba8_premul.as_ref().clone()
        } else {
            // Resample in premultiplied space; transparent texels must not contribute color.
            let src = image::RgbaImage::from_raw(
                img.width,
                img.height,
                img.rgba8_premul.as_ref().clone(),
            )
            .ok_or_else(|| TryOnError::evaluation("overlay buffer does not match its size"))?;
            image::imageops::resize(&src, width, height, image::imageops::FilterType::Triangle)
                .into_raw()
        };
        *cache = Some(ScaledOverlay {
            source: Arc::clone(img),
            width,
            height,
            pixels,
        });
    }
    cache
        .as_ref()
        .ok_or_else(|| TryOnError::evaluation("scaled overlay cache is empty"))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
