//! Immutable descriptions of multi-phase view transitions
//!
//! A [`SequenceAnimation`] only describes what should happen; stepping it
//! frame by frame is up to the host scheduler (or [`SequencePlayback`]).
//!
//! [`SequencePlayback`]: crate::animation::playback::SequencePlayback

use crate::animation::interpolation::{EasingFunction, Interpolation};
use crate::animation::playback::SequencePlayback;
use crate::core::geo::Point;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Handler invoked when a phase begins
pub type PhaseHook = Arc<dyn Fn(&AnimationPhase) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    ZoomOut,
    Move,
    ZoomIn,
    /// Position and scale change together
    Direct,
}

/// Center and scale of the view at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub center: Point,
    pub scale: f64,
}

/// One timed segment of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPhase {
    pub kind: PhaseKind,
    pub start_center: Point,
    pub end_center: Point,
    pub start_scale: f64,
    pub end_scale: f64,
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl AnimationPhase {
    pub fn start_frame(&self) -> ViewFrame {
        ViewFrame {
            center: self.start_center,
            scale: self.start_scale,
        }
    }

    pub fn end_frame(&self) -> ViewFrame {
        ViewFrame {
            center: self.end_center,
            scale: self.end_scale,
        }
    }

    /// Frame at normalized time `t` (clamped to `[0, 1]`)
    pub fn sample(&self, t: f64) -> ViewFrame {
        let eased = self.easing.apply(t);
        ViewFrame {
            center: Interpolation::point(&self.start_center, &self.end_center, eased),
            scale: Interpolation::geometric(self.start_scale, self.end_scale, eased),
        }
    }
}

/// Ordered phases of a transition plus an optional phase-start hook
#[derive(Clone)]
pub struct SequenceAnimation {
    custom_type: String,
    phases: Vec<AnimationPhase>,
    on_phase_start: Option<PhaseHook>,
}

impl SequenceAnimation {
    pub fn new(custom_type: impl Into<String>) -> Self {
        Self {
            custom_type: custom_type.into(),
            phases: Vec::new(),
            on_phase_start: None,
        }
    }

    /// Append a phase
    pub fn with_phase(mut self, phase: AnimationPhase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Set the phase-start hook
    pub fn on_phase_start(mut self, hook: Option<PhaseHook>) -> Self {
        self.on_phase_start = hook;
        self
    }

    pub fn custom_type(&self) -> &str {
        &self.custom_type
    }

    pub fn phases(&self) -> &[AnimationPhase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|phase| phase.duration).sum()
    }

    pub fn start_frame(&self) -> Option<ViewFrame> {
        self.phases.first().map(AnimationPhase::start_frame)
    }

    pub fn end_frame(&self) -> Option<ViewFrame> {
        self.phases.last().map(AnimationPhase::end_frame)
    }

    /// Runs the hook for phase `index`; schedulers call this once, when the phase begins
    pub fn notify_phase_start(&self, index: usize) {
        if let (Some(hook), Some(phase)) = (&self.on_phase_start, self.phases.get(index)) {
            hook(phase);
        }
    }

    /// Fresh frame-driven cursor over this sequence
    pub fn playback(&self) -> SequencePlayback<'_> {
        SequencePlayback::new(self)
    }
}

impl fmt::Debug for SequenceAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceAnimation")
            .field("custom_type", &self.custom_type)
            .field("phases", &self.phases)
            .field("has_hook", &self.on_phase_start.is_some())
            .finish()
    }
}
