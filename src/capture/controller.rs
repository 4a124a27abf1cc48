use std::sync::Arc;

use crate::{
    capture::{
        frame_loop::{FrameLoopHandle, TickOutcome},
        notify::{Notification, Notifier, TracingNotifier},
        snapshot::Snapshot,
    },
    catalog::{
        decode::OverlayImage,
        products::{OverlayCatalog, OverlayImageRef},
        store::{OverlayStatus, OverlayStore},
    },
    compose::compositor::FrameCompositor,
    config::TryOnConfig,
    foundation::{
        core::FrameRGBA,
        error::{TryOnError, TryOnResult},
    },
    media::source::{MediaSource, StreamConstraints, StreamHandle},
};

/// Lifecycle of the live camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureState {
    /// No stream, no frame loop.
    Idle,
    /// Waiting on the camera (possibly a permission prompt).
    Starting,
    /// Stream live, frame loop active.
    Streaming,
    /// Tearing down.
    Stopping,
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CaptureState::Idle => "idle",
            CaptureState::Starting => "starting",
            CaptureState::Streaming => "streaming",
            CaptureState::Stopping => "stopping",
        };
        f.write_str(s)
    }
}

/// Owns the camera stream, the frame loop, the overlay selection, and the output surface.
///
/// Everything runs on the caller's thread. A view binding calls [`start`](Self::start),
/// [`stop`](Self::stop), [`select_overlay`](Self::select_overlay), and
/// [`snapshot`](Self::snapshot), and drives [`tick`](Self::tick) once per display refresh
/// (see [`run_frame_loop`](crate::run_frame_loop)).
pub struct CaptureController {
    source: Box<dyn MediaSource>,
    catalog: Arc<dyn OverlayCatalog>,
    overlays: Arc<OverlayStore>,
    notifier: Arc<dyn Notifier>,
    constraints: StreamConstraints,
    snapshot_file_name: String,

    state: CaptureState,
    stream: Option<StreamHandle>,
    frame_loop: Option<FrameLoopHandle>,
    loop_generation: u64,
    selection: Option<String>,
    compositor: FrameCompositor,
}

impl CaptureController {
    /// Build an idle controller. Fails only on invalid configuration.
    pub fn new(
        source: Box<dyn MediaSource>,
        catalog: Arc<dyn OverlayCatalog>,
        overlays: Arc<OverlayStore>,
        config: &TryOnConfig,
    ) -> TryOnResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            catalog,
            overlays,
            notifier: Arc::new(TracingNotifier),
            constraints: config.constraints.clone(),
            snapshot_file_name: config.snapshot_file_name.clone(),
            state: CaptureState::Idle,
            stream: None,
            frame_loop: None,
            loop_generation: 0,
            selection: None,
            compositor: FrameCompositor::new(config.placement, config.mirror),
        })
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Shorthand for `state() == Streaming`.
    pub fn is_streaming(&self) -> bool {
        self.state == CaptureState::Streaming
    }

    /// Active frame loop token, present only while streaming.
    pub fn frame_loop(&self) -> Option<&FrameLoopHandle> {
        self.frame_loop.as_ref()
    }

    /// Currently selected product id.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Presentable output, `None` until the first frame of the current stream is drawn.
    pub fn surface(&self) -> Option<&FrameRGBA> {
        self.compositor.surface()
    }

    /// Frames composited for the current stream.
    pub fn frames_drawn(&self) -> u64 {
        self.compositor.frames_drawn()
    }

    /// Load status of the selected overlay; `None` without a catalog match.
    pub fn overlay_status(&self) -> Option<OverlayStatus> {
        let overlay = self.selected_overlay_ref()?;
        self.overlays.status(&overlay)
    }

    /// Open the camera and begin streaming.
    ///
    /// Only honored from `Idle`; any other state is left untouched. On failure the controller
    /// is back in `Idle`, a `TryOnFailed` notification has been sent, and the error is
    /// returned.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn start(&mut self) -> TryOnResult<()> {
        if self.state != CaptureState::Idle {
            tracing::debug!("start ignored: camera is not idle");
            return Ok(());
        }

        self.state = CaptureState::Starting;
        self.compositor.reset();

        match self.source.acquire(&self.constraints) {
            Ok(handle) => {
                self.loop_generation += 1;
                self.stream = Some(handle);
                self.frame_loop = Some(FrameLoopHandle::new(self.loop_generation));
                self.state = CaptureState::Streaming;
                tracing::info!(generation = self.loop_generation, "camera streaming");
                self.notifier.notify(&Notification::CameraStarted);
                Ok(())
            }
            Err(e) => {
                self.state = CaptureState::Idle;
                tracing::warn!(error = %e, "camera acquisition failed");
                self.notifier.notify(&Notification::TryOnFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Cancel the frame loop, then release the stream. No-op unless streaming.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn stop(&mut self) {
        if self.state != CaptureState::Streaming {
            return;
        }

        self.state = CaptureState::Stopping;
        // The loop must be gone before any track stops, so no tick can read a dead stream.
        self.frame_loop = None;
        if let Some(mut handle) = self.stream.take() {
            self.source.release(&mut handle);
        }
        self.state = CaptureState::Idle;
        tracing::info!("camera stopped");
        self.notifier.notify(&Notification::CameraStopped);
    }

    /// Choose the garment to overlay. Valid in any state.
    ///
    /// Unknown products are accepted and simply draw nothing.
    #[tracing::instrument(skip(self))]
    pub fn select_overlay(&mut self, product: &str) {
        self.selection = Some(product.to_string());
        match self.catalog.lookup(product) {
            Some(overlay) => {
                self.overlays.request(&overlay);
                self.notifier.notify(&Notification::OverlaySelected {
                    product: product.to_string(),
                });
            }
            None => tracing::debug!("product not in catalog; no overlay will be drawn"),
        }
    }

    /// Remove the current overlay selection.
    pub fn clear_overlay(&mut self) {
        self.selection = None;
    }

    /// Export the current composite as PNG. Only valid while streaming and after a frame.
    ///
    /// Failures are reported with a `TryOnFailed` notification and leave the state unchanged.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn snapshot(&mut self) -> TryOnResult<Snapshot> {
        let result = if self.state != CaptureState::Streaming {
            Err(TryOnError::snapshot_unavailable("camera is not streaming"))
        } else {
            match self.compositor.surface() {
                Some(surface) => Snapshot::encode(&self.snapshot_file_name, surface),
                None => Err(TryOnError::snapshot_unavailable(
                    "no frame has been composited yet",
                )),
            }
        };

        match &result {
            Ok(snap) => self.notifier.notify(&Notification::SnapshotCaptured {
                file_name: snap.file_name.clone(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "snapshot failed");
                self.notifier.notify(&Notification::TryOnFailed {
                    reason: e.to_string(),
                });
            }
        }
        result
    }

    /// Run one frame of the loop.
    ///
    /// Returns [`TickOutcome::Terminated`] as soon as the controller is not streaming; that is
    /// the loop's only cancellation point.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != CaptureState::Streaming || self.frame_loop.is_none() {
            return TickOutcome::Terminated;
        }
        let Some(stream) = self.stream.as_mut() else {
            return TickOutcome::Terminated;
        };

        let frame = match stream.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return TickOutcome::Skipped,
            Err(e) => {
                tracing::warn!(error = %e, "camera stream failed");
                self.notifier.notify(&Notification::TryOnFailed {
                    reason: e.to_string(),
                });
                self.stop();
                return TickOutcome::Terminated;
            }
        };

        let overlay = self.ready_overlay();
        match self.compositor.draw(&frame, overlay.as_ref()) {
            Ok(report) => {
                tracing::trace!(size = %report.size, overlay = report.overlay.is_some(), "frame composited");
                TickOutcome::Drawn(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "frame skipped");
                TickOutcome::Skipped
            }
        }
    }

    fn selected_overlay_ref(&self) -> Option<OverlayImageRef> {
        self.selection
            .as_deref()
            .and_then(|product| self.catalog.lookup(product))
    }

    fn ready_overlay(&self) -> Option<Arc<OverlayImage>> {
        let overlay = self.selected_overlay_ref()?;
        self.overlays.ready(&overlay)
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        if self.state == CaptureState::Streaming {
            self.stop();
        }
    }
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("state", &self.state)
            .field("stream", &self.stream)
            .field("frame_loop", &self.frame_loop)
            .field("selection", &self.selection)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/controller.rs"]
mod tests;
