use crate::core::bounds::Bounds;
use crate::core::constants::FIT_EPSILON;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::screen::ScreenOperations;

const COORDINATE_ULPS: f64 = 16.0;

/// Absolute slack for containment tests: relative to the extent of `bound`,
/// plus a few ulps of its coordinates so rounding far from the origin is absorbed
fn fit_tolerance(bound: &Bounds) -> f64 {
    let extent = bound.width().max(bound.height());
    let magnitude = [bound.min.x, bound.min.y, bound.max.x, bound.max.y]
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    extent * FIT_EPSILON + magnitude * COORDINATE_ULPS * f64::EPSILON
}

pub(crate) fn fits_into(clip: &Bounds, bound: &Bounds) -> bool {
    let tolerance = fit_tolerance(bound);
    bound.inflated(tolerance, tolerance).contains_bounds(clip)
}

/// Largest factor (<= 1) by which a box of `half_size` around `center` must
/// shrink to stay inside `bound`
fn shrink_factor(center: Point, half_size: Point, bound: &Bounds) -> f64 {
    let mut k: f64 = 1.0;
    if center.x - half_size.x < bound.min.x {
        k = k.min((center.x - bound.min.x) / half_size.x);
    }
    if center.x + half_size.x > bound.max.x {
        k = k.min((bound.max.x - center.x) / half_size.x);
    }
    if center.y - half_size.y < bound.min.y {
        k = k.min((center.y - bound.min.y) / half_size.y);
    }
    if center.y + half_size.y > bound.max.y {
        k = k.min((bound.max.y - center.y) / half_size.y);
    }
    k
}

impl ScreenOperations {
    /// True when translation alone can bring the view inside `bound`
    pub fn can_shrink_into(&self, screen: &Viewport, bound: &Bounds) -> bool {
        let clip = screen.clip_rect();
        let tolerance = fit_tolerance(bound);
        bound.width() + tolerance >= clip.width() && bound.height() + tolerance >= clip.height()
    }

    /// Translates the view the shortest distance that puts it inside `bound`,
    /// each axis independently; scale and rotation are kept.
    pub fn shrink_into(&self, screen: &Viewport, bound: &Bounds) -> Viewport {
        if bound.is_degenerate() {
            return screen.clone();
        }
        let clip = screen.clip_rect();
        if fits_into(&clip, bound) {
            return screen.clone();
        }

        let mut delta = Point::ZERO;
        if clip.min.x < bound.min.x {
            delta.x = bound.min.x - clip.min.x;
        }
        if clip.max.x + delta.x > bound.max.x {
            delta.x = bound.max.x - clip.max.x;
        }
        if clip.min.y < bound.min.y {
            delta.y = bound.min.y - clip.min.y;
        }
        if clip.max.y + delta.y > bound.max.y {
            delta.y = bound.max.y - clip.max.y;
        }

        log::trace!("shrink_into: moving view by {:?}", delta);
        let mut result = screen.clone();
        result.move_by(&delta);
        result
    }

    /// Zooms in around the view center until the view fits inside `bound`.
    ///
    /// A center outside `bound` is first clamped onto it; if the clamped
    /// center sits on an edge the center of `bound` is used instead.
    pub fn scale_into(&self, screen: &Viewport, bound: &Bounds) -> Viewport {
        if bound.is_degenerate() {
            return screen.clone();
        }
        let clip = screen.clip_rect();
        if fits_into(&clip, bound) {
            return screen.clone();
        }

        let half_size = clip.size().multiply(0.5);
        let mut center = bound.clamp(&screen.org());
        let mut k = shrink_factor(center, half_size, bound);
        if !(k.is_finite() && k > 0.0) {
            center = bound.center();
            k = shrink_factor(center, half_size, bound);
        }

        let result = match screen.with_center_and_scale(center, screen.scale() / k) {
            Ok(result) => result,
            Err(err) => {
                log::debug!("scale_into: cannot rescale by {}: {}", k, err);
                return screen.clone();
            }
        };
        log::trace!("scale_into: scale {} -> {}", screen.scale(), result.scale());
        result
    }

    /// Scales the view down to the extent of `bound` if needed, then shrinks
    /// it into `bound`. Both scale and border violations are resolved.
    pub fn shrink_and_scale_into(&self, screen: &Viewport, bound: &Bounds) -> Viewport {
        if bound.is_degenerate() {
            return screen.clone();
        }
        let clip = screen.clip_rect();
        if fits_into(&clip, bound) {
            return screen.clone();
        }

        let mut result = screen.clone();
        let k = (bound.width() / clip.width()).min(bound.height() / clip.height());
        if k < 1.0 {
            if let Err(err) = result.set_scale(screen.scale() / k) {
                log::debug!("shrink_and_scale_into: cannot rescale by {}: {}", k, err);
                return screen.clone();
            }
        }
        self.shrink_into(&result, bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(org: Point, scale: f64) -> Viewport {
        Viewport::new(Bounds::from_coords(0.0, 0.0, 800.0, 600.0), org, scale, 0.0).unwrap()
    }

    fn world() -> Bounds {
        Bounds::from_coords(-180.0, -180.0, 180.0, 180.0)
    }

    fn assert_inside(viewport: &Viewport, bound: &Bounds) {
        let clip = viewport.clip_rect();
        assert!(
            bound.inflated(1e-6, 1e-6).contains_bounds(&clip),
            "{:?} not inside {:?}",
            clip,
            bound
        );
    }

    #[test]
    fn test_can_shrink_into() {
        let ops = ScreenOperations::default();
        // 80x60 units
        assert!(ops.can_shrink_into(&screen(Point::new(500.0, 0.0), 10.0), &world()));
        // 400x300 units, too wide for the world
        assert!(!ops.can_shrink_into(&screen(Point::ZERO, 2.0), &world()));
    }

    #[test]
    fn test_shrink_into_minimal_translation() {
        let ops = ScreenOperations::default();
        let drifted = screen(Point::new(175.0, -10.0), 10.0);
        let fixed = ops.shrink_into(&drifted, &world());

        assert_inside(&fixed, &world());
        assert_eq!(fixed.scale(), drifted.scale());
        // Only x needed a correction: right edge aligned with the world.
        assert!((fixed.org().x - 140.0).abs() < 1e-9);
        assert_eq!(fixed.org().y, -10.0);
    }

    #[test]
    fn test_shrink_into_noop_when_inside() {
        let ops = ScreenOperations::default();
        let inside = screen(Point::new(10.0, 10.0), 10.0);
        assert_eq!(ops.shrink_into(&inside, &world()), inside);
    }

    #[test]
    fn test_scale_into_keeps_center() {
        let ops = ScreenOperations::default();
        let wide = screen(Point::new(100.0, 0.0), 2.0);
        let fitted = ops.scale_into(&wide, &world());

        assert_inside(&fitted, &world());
        assert_eq!(fitted.org(), Point::new(100.0, 0.0));
        // Right edge limits: 80 units of room for a 200 unit half width.
        assert!((fitted.scale() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_into_center_outside() {
        let ops = ScreenOperations::default();
        let lost = screen(Point::new(400.0, 0.0), 2.0);
        let fitted = ops.scale_into(&lost, &world());
        assert_inside(&fitted, &world());
    }

    #[test]
    fn test_shrink_and_scale_into() {
        let ops = ScreenOperations::default();
        let zoomed_out = screen(Point::new(300.0, 300.0), 0.5);
        let fixed = ops.shrink_and_scale_into(&zoomed_out, &world());

        assert_inside(&fixed, &world());
        // Width is the binding axis: 1600 units squeezed into 360.
        assert!((fixed.clip_rect().width() - 360.0).abs() < 1e-9);
        assert_eq!(ops.shrink_and_scale_into(&fixed, &world()), fixed);
    }

    #[test]
    fn test_scale_into_tiny_bound_far_from_origin() {
        let ops = ScreenOperations::default();
        let far = Point::new(1e7, 1e7);
        let bound = Bounds::from_center_and_size(far, 1e-3, 1e-3);
        // Shows 0.015 x 0.01125 units around the bound
        let view = screen(far, 800.0 / 0.015);

        let fitted = ops.scale_into(&view, &bound);
        let clip = fitted.clip_rect();
        assert!(clip.width() <= 1e-3 + 1e-8, "clip {:?} wider than bound", clip);
        assert!(bound.inflated(1e-8, 1e-8).contains_bounds(&clip));
    }

    #[test]
    fn test_degenerate_bound_is_noop() {
        let ops = ScreenOperations::default();
        let view = screen(Point::new(1000.0, 0.0), 1.0);
        let flat = Bounds::from_coords(0.0, 0.0, 100.0, 0.0);

        assert_eq!(ops.shrink_into(&view, &flat), view);
        assert_eq!(ops.scale_into(&view, &flat), view);
        assert_eq!(ops.shrink_and_scale_into(&view, &flat), view);
    }
}
