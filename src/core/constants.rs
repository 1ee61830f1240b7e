//! Core constants derived from the renderer defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Extent of the world (Mercator units) on each side of the origin.
pub const WORLD_HALF_EXTENT: f64 = 180.0;

/// Deepest zoom level with a drawing style.
pub const UPPER_STYLE_SCALE: i32 = 17;

/// Lowest zoom level at which perspective (3D) rendering is allowed.
pub const MIN_ALLOWABLE_IN_3D_SCALE: i32 = 16;

/// Upper bound for a whole animation, in seconds.
pub const MAX_ANIMATION_TIME_SEC: f64 = 1.5;

/// Scale ratio at or above which a move is animated as zoom-out / move / zoom-in.
pub const PRETTY_MOVE_SCALE_RATIO: f64 = 2.0;

/// Custom type tag of sequences built by the pretty-move builder.
pub const PRETTY_MOVE_ANIM: &str = "PrettyMove";

/// Returned by the fit-scale computation when no axis can be measured.
pub const NEUTRAL_SCALE: f64 = 1.0;

/// Relative tolerance used by containment checks in fit operations.
pub const FIT_EPSILON: f64 = 1e-9;
