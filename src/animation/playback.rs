use crate::animation::sequence::{SequenceAnimation, ViewFrame};
use std::time::Duration;

/// State of a playback cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// Frame-driven cursor over a [`SequenceAnimation`].
///
/// Each call to [`advance`](Self::advance) moves time forward by one frame's
/// delta. The sequence hook runs exactly once per phase, when the cursor
/// enters that phase and before any of its frames is produced.
#[derive(Debug)]
pub struct SequencePlayback<'a> {
    sequence: &'a SequenceAnimation,
    state: PlaybackState,
    phase_index: usize,
    /// Time spent in the current phase
    phase_elapsed: Duration,
}

impl<'a> SequencePlayback<'a> {
    pub fn new(sequence: &'a SequenceAnimation) -> Self {
        Self {
            sequence,
            state: PlaybackState::NotStarted,
            phase_index: 0,
            phase_elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the phase being played, if running
    pub fn current_phase(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Running => Some(self.phase_index),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Completed | PlaybackState::Cancelled
        )
    }

    /// Enter the first phase without advancing time
    pub fn start(&mut self) {
        if self.state != PlaybackState::NotStarted {
            return;
        }
        if self.sequence.is_empty() {
            self.state = PlaybackState::Completed;
            return;
        }
        self.state = PlaybackState::Running;
        self.phase_index = 0;
        self.phase_elapsed = Duration::ZERO;
        self.sequence.notify_phase_start(0);
    }

    /// Stops playback; later calls to `advance` return `None`
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.state = PlaybackState::Cancelled;
        }
    }

    /// Moves time forward by `delta` and returns the frame to render.
    ///
    /// Returns the final frame once on completion, then `None`.
    pub fn advance(&mut self, delta: Duration) -> Option<ViewFrame> {
        match self.state {
            PlaybackState::NotStarted => {
                self.start();
                if self.state != PlaybackState::Running {
                    return None;
                }
            }
            PlaybackState::Running => {}
            PlaybackState::Completed | PlaybackState::Cancelled => return None,
        }

        let phases = self.sequence.phases();
        self.phase_elapsed = self.phase_elapsed.saturating_add(delta);

        // Carry leftover time into the following phases.
        while self.phase_elapsed >= phases[self.phase_index].duration {
            self.phase_elapsed -= phases[self.phase_index].duration;
            if self.phase_index + 1 == phases.len() {
                self.state = PlaybackState::Completed;
                return Some(phases[self.phase_index].end_frame());
            }
            self.phase_index += 1;
            self.sequence.notify_phase_start(self.phase_index);
        }

        let phase = &phases[self.phase_index];
        let t = self.phase_elapsed.as_secs_f64() / phase.duration.as_secs_f64();
        Some(phase.sample(t))
    }
}
