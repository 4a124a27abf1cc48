use crate::foundation::{
    core::{FrameRGBA, FrameSize},
    error::{TryOnError, TryOnResult},
};

/// Which physical camera the caller prefers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front / selfie camera.
    #[default]
    User,
    /// Rear camera.
    Environment,
}

/// Capability request handed to [`MediaSource::acquire`].
///
/// These are preferences. Sources may deliver the nearest supported mode and callers must read
/// the real size from the frames they receive.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StreamConstraints {
    /// Preferred frame width.
    pub ideal_width: u32,
    /// Preferred frame height.
    pub ideal_height: u32,
    /// Preferred camera.
    pub facing: FacingMode,
    /// Platform device path, used by the ffmpeg backend.
    pub device: String,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
            facing: FacingMode::User,
            device: "/dev/video0".to_string(),
        }
    }
}

impl StreamConstraints {
    /// Requested size as a [`FrameSize`].
    pub fn ideal_size(&self) -> FrameSize {
        FrameSize::new(self.ideal_width, self.ideal_height)
    }

    /// Reject requests no camera can satisfy.
    pub fn validate(&self) -> TryOnResult<()> {
        if self.ideal_size().is_empty() {
            return Err(TryOnError::validation(
                "stream constraints ideal width/height must be non-zero",
            ));
        }
        if self.device.trim().is_empty() {
            return Err(TryOnError::validation(
                "stream constraints device must be non-empty",
            ));
        }
        Ok(())
    }
}

/// A live camera stream behind a [`StreamHandle`].
pub trait MediaStream: Send {
    /// Latest camera frame, or `None` when the device has not produced one yet.
    ///
    /// Frames are straight RGBA8 and carry their own size, which may differ from the
    /// requested constraints and may change between calls.
    fn read_frame(&mut self) -> TryOnResult<Option<FrameRGBA>>;

    /// Stop every underlying track. Must tolerate repeated calls.
    fn stop_tracks(&mut self);

    /// Number of tracks that are still running.
    fn live_tracks(&self) -> usize;
}

/// Exclusive ownership of one acquired camera stream.
///
/// Dropping the handle releases it, so a stream cannot outlive its owner.
pub struct StreamHandle {
    stream: Option<Box<dyn MediaStream>>,
}

impl StreamHandle {
    /// Wrap a freshly acquired stream.
    pub fn new(stream: Box<dyn MediaStream>) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// True until [`StreamHandle::release`] runs.
    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    /// Pull the current frame. Reading a released handle is an error rather than a stale draw.
    pub fn read_frame(&mut self) -> TryOnResult<Option<FrameRGBA>> {
        match self.stream.as_mut() {
            Some(s) => s.read_frame(),
            None => Err(TryOnError::evaluation("read from a released camera stream")),
        }
    }

    /// Stop all tracks and drop the stream. Idempotent.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            tracing::debug!(
                live_tracks = stream.live_tracks(),
                "camera stream released"
            );
        }
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Camera backend: turns constraints into a live [`StreamHandle`].
pub trait MediaSource {
    /// Open a camera stream.
    ///
    /// May block for as long as the platform's permission prompt is pending. Failures are
    /// [`TryOnError::PermissionDenied`] or [`TryOnError::DeviceUnavailable`].
    fn acquire(&mut self, constraints: &StreamConstraints) -> TryOnResult<StreamHandle>;

    /// Stop every track of `handle`. Releasing twice is a no-op.
    fn release(&mut self, handle: &mut StreamHandle) {
        handle.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
