use std::sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

use crate::{
    foundation::{
        core::{FrameRGBA, FrameSize},
        error::{TryOnError, TryOnResult},
    },
    media::source::{MediaSource, MediaStream, StreamConstraints, StreamHandle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    Gradient,
    Solid([u8; 4]),
}

/// Deterministic in-process camera.
///
/// Produces a gradient test pattern (or a solid color) and can be configured to deliver a size
/// other than the one requested, to change size mid-stream, or to withhold the first few frames
/// the way real devices do while warming up.
#[derive(Debug)]
pub struct SyntheticCamera {
    delivered: Option<FrameSize>,
    resize_at: Vec<(u64, FrameSize)>,
    warmup_frames: u64,
    pattern: Pattern,
    acquisitions: Arc<AtomicU64>,
    live_streams: Arc<AtomicUsize>,
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticCamera {
    /// Camera that honors the requested size and draws a gradient.
    pub fn new() -> Self {
        Self {
            delivered: None,
            resize_at: Vec::new(),
            warmup_frames: 0,
            pattern: Pattern::Gradient,
            acquisitions: Arc::new(AtomicU64::new(0)),
            live_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Deliver `size` regardless of the requested constraints.
    pub fn with_delivered_size(mut self, size: FrameSize) -> Self {
        self.delivered = Some(size);
        self
    }

    /// Switch to `size` starting with frame `frame_index` (0-based, counted per stream).
    pub fn with_resize_at(mut self, frame_index: u64, size: FrameSize) -> Self {
        self.resize_at.push((frame_index, size));
        self.resize_at.sort_by_key(|(idx, _)| *idx);
        self
    }

    /// Report "no frame yet" for the first `frames` reads of each stream.
    pub fn with_warmup_frames(mut self, frames: u64) -> Self {
        self.warmup_frames = frames;
        self
    }

    /// Fill every frame with a single straight-alpha color.
    pub fn with_solid_color(mut self, rgba: [u8; 4]) -> Self {
        self.pattern = Pattern::Solid(rgba);
        self
    }

    /// Total successful acquisitions since construction.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Shared counter of streams whose tracks are still running.
    pub fn live_streams(&self) -> Arc<AtomicUsize> {
        self.live_streams.clone()
    }
}

impl MediaSource for SyntheticCamera {
    fn acquire(&mut self, constraints: &StreamConstraints) -> TryOnResult<StreamHandle> {
        let size = self.delivered.unwrap_or_else(|| constraints.ideal_size());
        if size.is_empty() {
            return Err(TryOnError::device_unavailable(format!(
                "synthetic camera cannot deliver {size}"
            )));
        }

        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.live_streams.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(requested = %constraints.ideal_size(), delivered = %size, "synthetic camera acquired");

        Ok(StreamHandle::new(Box::new(SyntheticStream {
            size,
            resize_at: self.resize_at.clone(),
            warmup_left: self.warmup_frames,
            pattern: self.pattern,
            frame_index: 0,
            live: true,
            live_streams: self.live_streams.clone(),
        })))
    }
}

struct SyntheticStream {
    size: FrameSize,
    resize_at: Vec<(u64, FrameSize)>,
    warmup_left: u64,
    pattern: Pattern,
    frame_index: u64,
    live: bool,
    live_streams: Arc<AtomicUsize>,
}

impl SyntheticStream {
    fn current_size(&self) -> FrameSize {
        self.resize_at
            .iter()
            .rev()
            .find(|(idx, _)| *idx <= self.frame_index)
            .map(|(_, size)| *size)
            .unwrap_or(self.size)
    }

    fn render(&self, size: FrameSize) -> TryOnResult<FrameRGBA> {
        match self.pattern {
            Pattern::Solid(rgba) => FrameRGBA::solid(size, rgba),
            Pattern::Gradient => {
                let mut data = Vec::with_capacity(size.rgba8_len()?);
                let w = size.width.max(2) - 1;
                let h = size.height.max(2) - 1;
                let b = (self.frame_index.wrapping_mul(8) % 256) as u8;
                for y in 0..size.height {
                    for x in 0..size.width {
                        data.extend_from_slice(&[
                            (x * 255 / w) as u8,
                            (y * 255 / h) as u8,
                            b,
                            255,
                        ]);
                    }
                }
                Ok(FrameRGBA {
                    width: size.width,
                    height: size.height,
                    data,
                    premultiplied: false,
                })
            }
        }
    }
}

impl MediaStream for SyntheticStream {
    fn read_frame(&mut self) -> TryOnResult<Option<FrameRGBA>> {
        if !self.live {
            return Err(TryOnError::device_unavailable(
                "synthetic camera track has ended",
            ));
        }
        if self.warmup_left > 0 {
            self.warmup_left -= 1;
            return Ok(None);
        }

        let frame = self.render(self.current_size())?;
        self.frame_index += 1;
        Ok(Some(frame))
    }

    fn stop_tracks(&mut self) {
        if self.live {
            self.live = false;
            self.live_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn live_tracks(&self) -> usize {
        usize::from(self.live)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/synthetic.rs"]
mod tests;
