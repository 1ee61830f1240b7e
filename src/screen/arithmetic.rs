use crate::core::bounds::Bounds;
use crate::core::constants::NEUTRAL_SCALE;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::screen::ScreenOperations;

/// Scale (pixels per unit) at which `local_rect` spans `pixel_rect` without
/// overflowing either axis.
///
/// Axes with no extent are skipped; when neither axis can be measured the
/// neutral scale is returned instead of an infinity or NaN.
pub fn calculate_scale(pixel_rect: &Bounds, local_rect: &Bounds) -> f64 {
    let ratio = |pixel: f64, local: f64| {
        if pixel > 0.0 && local > 0.0 && (pixel / local).is_finite() {
            Some(pixel / local)
        } else {
            None
        }
    };

    match (
        ratio(pixel_rect.width(), local_rect.width()),
        ratio(pixel_rect.height(), local_rect.height()),
    ) {
        (Some(x), Some(y)) => x.min(y),
        (Some(x), None) => x,
        (None, Some(y)) => y,
        (None, None) => NEUTRAL_SCALE,
    }
}

/// Global origin that places `user_pos` at `pixel_pos` for the scale and
/// azimuth of `screen`.
pub fn calculate_center(
    screen: &Viewport,
    user_pos: Point,
    pixel_pos: Point,
    azimuth: f64,
) -> Point {
    calculate_center_with(
        screen.scale(),
        &screen.pixel_rect(),
        user_pos,
        pixel_pos,
        azimuth,
    )
}

/// Global origin that places `user_pos` at `pixel_pos` when the view has
/// `scale` pixels per unit, covers `pixel_rect` and is rotated by `azimuth`.
pub fn calculate_center_with(
    scale: f64,
    pixel_rect: &Bounds,
    user_pos: Point,
    pixel_pos: Point,
    azimuth: f64,
) -> Point {
    let mut forming = pixel_rect.center().subtract(&pixel_pos).multiply(1.0 / scale);
    forming.y = -forming.y;
    user_pos.add(&forming.rotate(azimuth))
}

impl ScreenOperations {
    /// Whether perspective rendering is allowed at zoom level `scale`.
    ///
    /// Low density displays get one more level, tablets one less.
    pub fn is_scale_allowable_in_3d(&self, scale: i32) -> bool {
        let mut min_scale = self.config.min_allowable_in_3d_scale;
        if self.config.visual_scale <= 1.0 {
            min_scale -= 1;
        }
        if self.config.tablet {
            min_scale += 1;
        }
        scale >= min_scale
    }
}
