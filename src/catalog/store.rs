use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Condvar, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use anyhow::Context;

use crate::{
    catalog::{
        decode::{OverlayImage, decode_overlay},
        products::OverlayImageRef,
    },
    foundation::error::{TryOnError, TryOnResult},
};

/// Readiness of one cached overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayStatus {
    /// Load requested, not finished.
    Pending,
    /// Decoded and drawable.
    Ready,
    /// Load failed; stays unready.
    Failed,
}

#[derive(Clone, Debug)]
enum Slot {
    Pending,
    Ready(Arc<OverlayImage>),
    Failed(String),
}

impl Slot {
    fn status(&self) -> OverlayStatus {
        match self {
            Slot::Pending => OverlayStatus::Pending,
            Slot::Ready(_) => OverlayStatus::Ready,
            Slot::Failed(_) => OverlayStatus::Failed,
        }
    }
}

/// Shared cache of decoded overlays keyed by [`OverlayImageRef`].
///
/// Loads run on the rayon global pool; readers only ever see `Ready` images, so the cache can
/// be shared between controllers behind an `Arc`.
#[derive(Debug)]
pub struct OverlayStore {
    root: PathBuf,
    slots: Mutex<HashMap<OverlayImageRef, Slot>>,
    changed: Condvar,
}

impl OverlayStore {
    /// Store resolving overlay paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            slots: Mutex::new(HashMap::new()),
            changed: Condvar::new(),
        }
    }

    /// Directory overlay paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<OverlayImageRef, Slot>> {
        // A panic while holding the lock cannot leave a slot half-written.
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start loading `overlay` in the background unless it is already cached or in flight.
    pub fn request(self: &Arc<Self>, overlay: &OverlayImageRef) {
        {
            let mut slots = self.slots();
            if slots.contains_key(overlay) {
                return;
            }
            slots.insert(overlay.clone(), Slot::Pending);
        }

        tracing::debug!(overlay = %overlay, "overlay load requested");
        let store = Arc::clone(self);
        let overlay = overlay.clone();
        rayon::spawn(move || {
            let result = store.read_and_decode(&overlay);
            store.finish(&overlay, result);
        });
    }

    /// Load `overlay` on the calling thread, replacing any pending or failed slot.
    pub fn load_blocking(&self, overlay: &OverlayImageRef) -> TryOnResult<Arc<OverlayImage>> {
        if let Some(img) = self.ready(overlay) {
            return Ok(img);
        }
        let result = self.read_and_decode(overlay);
        let out = match &result {
            Ok(img) => Ok(Arc::clone(img)),
            Err(e) => Err(TryOnError::evaluation(format!(
                "load overlay '{overlay}': {e}"
            ))),
        };
        self.finish(overlay, result);
        out
    }

    /// Register an already decoded overlay.
    pub fn insert(&self, overlay: OverlayImageRef, image: OverlayImage) {
        self.slots().insert(overlay, Slot::Ready(Arc::new(image)));
        self.changed.notify_all();
    }

    /// The decoded overlay, only once it is ready.
    pub fn ready(&self, overlay: &OverlayImageRef) -> Option<Arc<OverlayImage>> {
        match self.slots().get(overlay) {
            Some(Slot::Ready(img)) => Some(Arc::clone(img)),
            _ => None,
        }
    }

    /// Current status; `None` when never requested.
    pub fn status(&self, overlay: &OverlayImageRef) -> Option<OverlayStatus> {
        self.slots().get(overlay).map(Slot::status)
    }

    /// Load error for an overlay in the `Failed` state.
    pub fn failure(&self, overlay: &OverlayImageRef) -> Option<String> {
        match self.slots().get(overlay) {
            Some(Slot::Failed(msg)) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Block until `overlay` leaves `Pending` or `timeout` elapses.
    pub fn wait_ready(
        &self,
        overlay: &OverlayImageRef,
        timeout: Duration,
    ) -> Option<Arc<OverlayImage>> {
        let deadline = Instant::now() + timeout;
        let mut slots = self.slots();
        loop {
            match slots.get(overlay) {
                Some(Slot::Ready(img)) => return Some(Arc::clone(img)),
                Some(Slot::Pending) => {}
                Some(Slot::Failed(_)) | None => return None,
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            slots = match self.changed.wait_timeout(slots, deadline - now) {
                Ok((guard, _)) => guard,
                Err(e) => e.into_inner().0,
            };
        }
    }

    fn read_and_decode(&self, overlay: &OverlayImageRef) -> TryOnResult<Arc<OverlayImage>> {
        let path = self.root.join(Path::new(overlay.as_str()));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read overlay bytes from '{}'", path.display()))?;
        decode_overlay(&bytes).map(Arc::new)
    }

    fn finish(&self, overlay: &OverlayImageRef, result: TryOnResult<Arc<OverlayImage>>) {
        let slot = match result {
            Ok(img) => {
                tracing::debug!(overlay = %overlay, width = img.width, height = img.height, "overlay ready");
                Slot::Ready(img)
            }
            Err(e) => {
                tracing::warn!(overlay = %overlay, error = %e, "overlay failed to load; it will not be drawn");
                Slot::Failed(e.to_string())
            }
        };
        self.slots().insert(overlay.clone(), slot);
        self.changed.notify_all();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
