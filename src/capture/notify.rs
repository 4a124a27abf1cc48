use std::sync::Mutex;

/// User-facing events raised by the controller. Fire-and-forget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Camera is streaming.
    CameraStarted,
    /// Camera stopped and released.
    CameraStopped,
    /// A product was chosen and its overlay is loading or drawn.
    OverlaySelected {
        /// Selected product id.
        product: String,
    },
    /// Camera acquisition, streaming, or snapshot export failed.
    TryOnFailed {
        /// Human-readable cause.
        reason: String,
    },
    /// A snapshot was encoded.
    SnapshotCaptured {
        /// Suggested download name.
        file_name: String,
    },
}

/// Sink for [`Notification`]s. Implementations must not block or call back into the controller.
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notification: &Notification);
}

/// Emits notifications as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::CameraStarted => {
                tracing::info!(target: "aura_tryon::notify", "camera started")
            }
            Notification::CameraStopped => {
                tracing::info!(target: "aura_tryon::notify", "camera stopped")
            }
            Notification::OverlaySelected { product } => {
                tracing::info!(target: "aura_tryon::notify", %product, "now trying on")
            }
            Notification::TryOnFailed { reason } => {
                tracing::warn!(target: "aura_tryon::notify", %reason, "try-on failed")
            }
            Notification::SnapshotCaptured { file_name } => {
                tracing::info!(target: "aura_tryon::notify", %file_name, "snapshot captured")
            }
        }
    }
}

/// Keeps every notification in memory; handy for UI bindings that poll.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drain and return everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
    }
}
