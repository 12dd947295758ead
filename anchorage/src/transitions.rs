//! Discrete fade timing.
//!
//! Hosts drive annotation fades with a repeating timer. Each tick advances
//! one step; the schedule maps steps to opacity and says when to stop.

use std::time::Duration;

/// Step count used when a fade does not ask for one.
pub const DEFAULT_FADE_STEPS: u32 = 10;

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A fade split into equal timer steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSchedule {
    duration: Duration,
    steps: u32,
    easing: Easing,
}

impl FadeSchedule {
    /// A linear fade over `duration` in [`DEFAULT_FADE_STEPS`] steps.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            steps: DEFAULT_FADE_STEPS,
            easing: Easing::Linear,
        }
    }

    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = steps.max(1);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn step_count(&self) -> u32 {
        self.steps
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Delay between two timer ticks.
    pub fn interval(&self) -> Duration {
        self.duration / self.steps
    }

    /// Opacity after `step` ticks, in `0.0..=1.0`.
    pub fn opacity_at(&self, step: u32) -> f32 {
        let t = step.min(self.steps) as f32 / self.steps as f32;
        self.easing.apply(t).clamp(0.0, 1.0)
    }

    /// True once `step` reaches full opacity; the timer must stop here.
    pub fn is_complete(&self, step: u32) -> bool {
        step >= self.steps
    }
}
