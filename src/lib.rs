//! Aura try-on: live garment compositing over a camera stream.
//!
//! The crate turns a camera stream plus a selected product into a presentable pixel surface,
//! once per display refresh, and can export the current composite as a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: [`MediaSource::acquire`] opens a camera and yields a [`StreamHandle`]
//! 2. **Select**: [`CaptureController::select_overlay`] maps a product id through an
//!    [`OverlayCatalog`] and loads the garment into the shared [`OverlayStore`]
//! 3. **Composite**: each [`CaptureController::tick`] draws the camera frame and, once ready, the
//!    overlay at a fixed [`OverlayPlacement`]
//! 4. **Export** (optional): [`CaptureController::snapshot`] encodes the surface as PNG
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded loop**: drawing, start/stop and selection all happen on the caller's thread;
//!   only overlay decoding runs on the rayon pool.
//! - **Nothing fatal**: every failure leaves the controller `Idle` or still `Streaming`.
//!
//! See [`crate::guide`] for a walkthrough.
#![forbid(unsafe_code)]

mod capture;
mod catalog;
mod compose;
mod config;
mod foundation;
mod media;

/// Standalone walkthrough of the try-on pipeline.
pub mod guide;

pub use capture::controller::{CaptureController, CaptureState};
pub use capture::frame_loop::{
    FixedRateClock, FrameClock, FrameLoopHandle, LoopStats, ManualClock, TickOutcome,
    run_frame_loop, run_frame_loop_with,
};
pub use capture::notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use capture::snapshot::{SNAPSHOT_FILE_NAME, Snapshot, encode_png};
pub use catalog::decode::{OverlayImage, decode_frame, decode_overlay};
pub use catalog::products::{
    OverlayCatalog, OverlayImageRef, Product, StaticCatalog, normalize_rel_path,
};
pub use catalog::store::{OverlayStatus, OverlayStore};
pub use compose::composite::{PremulRgba8, over};
pub use compose::compositor::{DrawReport, FrameCompositor};
pub use compose::placement::OverlayPlacement;
pub use compose::still::compose_still;
pub use config::TryOnConfig;
pub use foundation::core::{Fps, FrameRGBA, FrameSize, Rect};
pub use foundation::error::{TryOnError, TryOnResult};
pub use media::ffmpeg::{FfmpegCamera, classify_device_error};
pub use media::source::{FacingMode, MediaSource, MediaStream, StreamConstraints, StreamHandle};
pub use media::synthetic::SyntheticCamera;
