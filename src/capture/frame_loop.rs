use std::time::{Duration, Instant};

use crate::{
    capture::controller::CaptureController, compose::compositor::DrawReport,
    foundation::core::Fps,
};

/// Token for the controller's active frame loop.
///
/// Exactly one exists while streaming. Each start issues a new generation, so a loop driven for
/// an earlier stream notices the change and exits instead of drawing into the new one.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameLoopHandle {
    generation: u64,
}

impl FrameLoopHandle {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// Monotonic id of the stream this loop belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of one frame tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// A frame was composited; reschedule.
    Drawn(DrawReport),
    /// Nothing to draw this time (no camera frame yet, or a bad frame); reschedule.
    Skipped,
    /// The controller is no longer streaming; do not reschedule.
    Terminated,
}

impl TickOutcome {
    /// True when the loop must stop.
    pub fn is_terminated(&self) -> bool {
        matches!(self, TickOutcome::Terminated)
    }
}

/// Source of display-refresh ticks.
pub trait FrameClock {
    /// Block until the next frame should be drawn.
    fn wait_next_frame(&mut self);
}

/// Ticks at a fixed rate, catching up without bursting after a slow frame.
#[derive(Clone, Debug)]
pub struct FixedRateClock {
    period: Duration,
    next: Option<Instant>,
}

impl FixedRateClock {
    /// Clock ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            period: fps.frame_duration(),
            next: None,
        }
    }
}

impl FrameClock for FixedRateClock {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        let after = deadline.max(now) + self.period;
        self.next = Some(after);
    }
}

/// Clock that never waits. Counts ticks.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    ticks: u64,
}

impl ManualClock {
    /// Fresh clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl FrameClock for ManualClock {
    fn wait_next_frame(&mut self) {
        self.ticks += 1;
    }
}

/// Counters for one [`run_frame_loop`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Ticks that composited a frame.
    pub drawn: u64,
    /// Ticks that drew nothing but rescheduled.
    pub skipped: u64,
    /// Whether the loop ended because the controller stopped streaming.
    pub terminated: bool,
}

/// Drive the controller's frame loop until it terminates or `max_frames` ticks have run.
pub fn run_frame_loop(
    controller: &mut CaptureController,
    clock: &mut dyn FrameClock,
    max_frames: Option<u64>,
) -> LoopStats {
    run_frame_loop_with(controller, clock, max_frames, |_, _| {})
}

/// Like [`run_frame_loop`], calling `on_frame` after every tick.
///
/// `on_frame` is where a view binding interleaves user intent (stop, select, snapshot) with
/// drawing; everything stays on one thread.
pub fn run_frame_loop_with<F>(
    controller: &mut CaptureController,
    clock: &mut dyn FrameClock,
    max_frames: Option<u64>,
    mut on_frame: F,
) -> LoopStats
where
    F: FnMut(&mut CaptureController, &TickOutcome),
{
    let mut stats = LoopStats::default();
    let Some(generation) = controller.frame_loop().map(FrameLoopHandle::generation) else {
        stats.terminated = true;
        return stats;
    };

    loop {
        if max_frames.is_some_and(|max| stats.ticks >= max) {
            break;
        }
        clock.wait_next_frame();

        if controller.frame_loop().map(FrameLoopHandle::generation) != Some(generation) {
            stats.terminated = true;
            break;
        }

        let outcome = controller.tick();
        match outcome {
            TickOutcome::Drawn(_) => {
                stats.ticks += 1;
                stats.drawn += 1;
            }
            TickOutcome::Skipped => {
                stats.ticks += 1;
                stats.skipped += 1;
            }
            TickOutcome::Terminated => {
                stats.terminated = true;
                break;
            }
        }
        on_frame(controller, &outcome);
    }

    tracing::debug!(
        generation,
        ticks = stats.ticks,
        drawn = stats.drawn,
        skipped = stats.skipped,
        terminated = stats.terminated,
        "frame loop finished"
    );
    stats
}
