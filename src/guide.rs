//! # Aura try-on guide
//!
//! A short, end-to-end walkthrough of the live try-on pipeline and its public API.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`MediaSource`](crate::MediaSource): opens a camera and returns a [`StreamHandle`](crate::StreamHandle)
//! - [`OverlayCatalog`](crate::OverlayCatalog): product id -> [`OverlayImageRef`](crate::OverlayImageRef)
//! - [`OverlayStore`](crate::OverlayStore): shared, lazily loaded cache of decoded garments
//! - [`FrameCompositor`](crate::FrameCompositor): draws camera frame + overlay into the output surface
//! - [`CaptureController`](crate::CaptureController): owns all of the above and the state machine
//!
//! ## State machine
//!
//! ```text
//! Idle --start()--> Starting --acquire ok--> Streaming --stop()--> Stopping --> Idle
//!                       \--acquire failed--> Idle (TryOnFailed notification)
//! ```
//!
//! `start()` is ignored outside `Idle`, so two calls never open two streams. `stop()` is a no-op
//! outside `Streaming`. Dropping a streaming controller stops it.
//!
//! ## The frame loop
//!
//! There is no background render thread. A view binding calls
//! [`CaptureController::tick`](crate::CaptureController::tick) once per display refresh, usually
//! through [`run_frame_loop`](crate::run_frame_loop) with a [`FrameClock`](crate::FrameClock).
//! Every tick first checks that the controller is still streaming; when it is not, the tick
//! returns [`TickOutcome::Terminated`](crate::TickOutcome::Terminated) and the loop ends. `stop()`
//! drops the [`FrameLoopHandle`](crate::FrameLoopHandle) before releasing the stream, so no tick can
//! read from a torn-down camera.
//!
//! Per tick:
//!
//! 1. Read the newest camera frame (skip the tick when the camera has none yet).
//! 2. Resize the output surface to the frame's own size.
//! 3. Copy the frame.
//! 4. If the selected product resolves and its overlay is ready, draw it 60% of the surface wide,
//!    aspect preserved, centered, 15% from the top, at 80% opacity.
//!
//! ## Overlays
//!
//! Selecting a product that is not in the catalog is fine: nothing is drawn. Selecting a known
//! product starts a background decode; until it finishes, frames are drawn without the overlay.
//!
//! ## Snapshots
//!
//! [`CaptureController::snapshot`](crate::CaptureController::snapshot) encodes the last composited
//! surface as PNG under the configured file name (default `aura-live-tryon.png`). Before the first
//! frame it fails with [`TryOnError::SnapshotUnavailable`](crate::TryOnError::SnapshotUnavailable)
//! and the controller keeps streaming.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use aura_tryon::{
//!     CaptureController, ManualClock, OverlayStore, StaticCatalog, SyntheticCamera, TryOnConfig,
//!     run_frame_loop,
//! };
//!
//! # fn main() -> aura_tryon::TryOnResult<()> {
//! let catalog = Arc::new(StaticCatalog::builtin());
//! let overlays = Arc::new(OverlayStore::new("clothes_images"));
//! let mut controller = CaptureController::new(
//!     Box::new(SyntheticCamera::new()),
//!     catalog,
//!     overlays,
//!     &TryOnConfig::default(),
//! )?;
//!
//! controller.start()?;
//! controller.select_overlay("top1");
//! run_frame_loop(&mut controller, &mut ManualClock::new(), Some(3));
//! let snap = controller.snapshot()?;
//! snap.write_to_dir(std::path::Path::new("out"))?;
//! controller.stop();
//! # Ok(())
//! # }
//! ```
