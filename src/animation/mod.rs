pub mod interpolation;
pub mod playback;
pub mod pretty_move;
pub mod sequence;

// Re-export commonly used types and functions for convenience
pub use interpolation::{EasingFunction, Interpolatable, Interpolation};
pub use playback::{PlaybackState, SequencePlayback};
pub use pretty_move::{pretty_move_animation, TransitionBuilder};
pub use sequence::{AnimationPhase, PhaseHook, PhaseKind, SequenceAnimation, ViewFrame};
