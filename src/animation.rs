use keyframe::{functions::Linear, AnimationSequence, Keyframe};
use pathfollow_core::{Interpolatable, Offset};
use std::fmt;

/// Default length of one loop around the path, in seconds.
pub const DEFAULT_DURATION: f64 = 5.0;

/// A 0 → 1 linear ramp over `duration` seconds.
fn linear_ramp(duration: f64) -> AnimationSequence<f64> {
    AnimationSequence::from(vec![
        Keyframe::new(0.0, 0.0, Linear),
        Keyframe::new(1.0, duration, Linear),
    ])
}

/// Linear 0 → 1 timeline that snaps back to 0 and repeats forever.
///
/// There is no reverse leg: the value at `elapsed` is
/// `(elapsed / duration) mod 1`.
#[derive(Clone)]
pub struct LoopingTimeline {
    duration: f64,
    sequence: AnimationSequence<f64>,
}

impl LoopingTimeline {
    /// `duration` must be positive; callers validate it through the config.
    pub fn new(duration: f64) -> Self {
        debug_assert!(duration > 0.0, "timeline duration must be positive");
        Self {
            duration,
            sequence: linear_ramp(duration),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Progress in `[0, 1)` after `elapsed` seconds.
    pub fn progress_at(&mut self, elapsed: f64) -> f64 {
        let local = elapsed.max(0.0).rem_euclid(self.duration);
        self.sequence.advance_to(local);
        self.sequence.now()
    }
}

impl fmt::Debug for LoopingTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopingTimeline")
            .field("duration", &self.duration)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverState {
    /// Not yet on screen (or torn down).
    Idle,
    /// Looping since `started_at` on the caller's clock.
    Advancing { started_at: f64 },
}

/// Owns the offset scalar and advances it once per frame.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    timeline: LoopingTimeline,
    state: DriverState,
    offset: Offset,
}

impl AnimationDriver {
    pub fn new(duration: f64) -> Self {
        Self {
            timeline: LoopingTimeline::new(duration),
            state: DriverState::Idle,
            offset: Offset::START,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    /// Starts looping at `now`. Appearing again while advancing is a no-op.
    pub fn appear(&mut self, now: f64) {
        if self.state == DriverState::Idle {
            tracing::debug!(now, duration = self.duration(), "path animation started");
            self.state = DriverState::Advancing { started_at: now };
        }
    }

    /// Stops the loop and rewinds to the start.
    pub fn stop(&mut self) {
        self.state = DriverState::Idle;
        self.offset = Offset::START;
    }

    /// Advances to `now` and returns the offset for this frame.
    pub fn tick(&mut self, now: f64) -> Offset {
        if let DriverState::Advancing { started_at } = self.state {
            let progress = self.timeline.progress_at(now - started_at);
            self.offset = Offset::wrapping(progress);
        }
        self.offset
    }
}

/// A one-shot linear transition between two interpolatable values.
#[derive(Clone)]
pub struct Transition<T: Interpolatable> {
    pub from: T,
    pub to: T,
    progress: Option<AnimationSequence<f64>>,
    pub current_value: T,
}

impl<T: Interpolatable> Transition<T> {
    /// A zero (or negative) duration jumps straight to `to`.
    pub fn new(from: T, to: T, duration: f64) -> Self {
        let progress = (duration > 0.0).then(|| linear_ramp(duration));
        let current_value = if progress.is_some() {
            from.clone()
        } else {
            to.clone()
        };
        Self {
            from,
            to,
            progress,
            current_value,
        }
    }

    /// Holds `value` for the whole animation.
    pub fn constant(value: T) -> Self {
        Self::new(value.clone(), value, 0.0)
    }

    pub fn update(&mut self, time: f64) {
        if let Some(sequence) = &mut self.progress {
            sequence.advance_to(time.max(0.0));
            let t = sequence.now();
            self.current_value = self.from.lerp(&self.to, t);
        }
    }
}

impl<T> fmt::Debug for Transition<T>
where
    T: Interpolatable + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("current_value", &self.current_value)
            .finish()
    }
}
