//! Property tests for the constraint and fit operations

use mapview::prelude::*;
use proptest::prelude::*;
use std::f64::consts::TAU;

fn pixel_rect() -> Bounds {
    Bounds::from_coords(0.0, 0.0, 800.0, 600.0)
}

fn large_world_ops() -> ScreenOperations {
    ScreenOperations::new(
        ViewportConfig::default()
            .with_world_rect(Bounds::from_coords(-5000.0, -5000.0, 5000.0, 5000.0)),
    )
    .unwrap()
}

fn scenario_viewport() -> Viewport {
    Viewport::from_rects(pixel_rect(), Bounds::from_coords(0.0, 0.0, 1000.0, 1000.0)).unwrap()
}

fn arb_viewport() -> impl Strategy<Value = Viewport> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64, 0.05..10.0f64, 0.0..TAU).prop_map(
        |(x, y, scale, angle)| Viewport::new(pixel_rect(), Point::new(x, y), scale, angle).unwrap(),
    )
}

fn arb_bound() -> impl Strategy<Value = Bounds> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64, 1.0..2000.0f64, 1.0..2000.0f64)
        .prop_map(|(x, y, w, h)| Bounds::from_center_and_size(Point::new(x, y), w, h))
}

fn fits_with_tolerance(inner: &Bounds, outer: &Bounds) -> bool {
    let slack = 1e-7 * (outer.width() + outer.height() + outer.center().length() + 1.0);
    outer.inflated(slack, slack).contains_bounds(inner)
}

proptest! {
    #[test]
    fn prop_views_inside_world_pass_checks(
        level in 2.0..16.0f64,
        tx in 0.0..1.0f64,
        ty in 0.0..1.0f64,
    ) {
        let ops = ScreenOperations::default();
        let world = ops.config().world_rect;
        let scale = ops.scale_for_level(level);
        let half_w = pixel_rect().width() / scale / 2.0;
        let half_h = pixel_rect().height() / scale / 2.0;
        let org = Point::new(
            world.min.x + half_w + tx * (world.width() - 2.0 * half_w),
            world.min.y + half_h + ty * (world.height() - 2.0 * half_h),
        );
        let view = Viewport::new(pixel_rect(), org, scale, 0.0).unwrap();

        prop_assert!(ops.check_min_scale(&view));
        prop_assert!(ops.check_max_scale(&view));
        prop_assert!(ops.check_borders(&view));
    }

    #[test]
    fn prop_shrink_and_scale_into_is_idempotent(view in arb_viewport(), bound in arb_bound()) {
        let ops = ScreenOperations::default();
        let once = ops.shrink_and_scale_into(&view, &bound);
        let twice = ops.shrink_and_scale_into(&once, &bound);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_shrink_into_contains(view in arb_viewport(), bound in arb_bound()) {
        let ops = ScreenOperations::default();
        prop_assume!(ops.can_shrink_into(&view, &bound));
        let fitted = ops.shrink_into(&view, &bound);
        prop_assert!(fits_with_tolerance(&fitted.clip_rect(), &bound));
        prop_assert_eq!(fitted.scale(), view.scale());
    }

    #[test]
    fn prop_scale_into_contains(view in arb_viewport(), bound in arb_bound()) {
        let ops = ScreenOperations::default();
        let fitted = ops.scale_into(&view, &bound);
        prop_assert!(fits_with_tolerance(&fitted.clip_rect(), &bound));
    }

    #[test]
    fn prop_calculate_scale_spans_one_axis(pixel in arb_bound(), local in arb_bound()) {
        let scale = calculate_scale(&pixel, &local);
        let width = local.width() * scale;
        let height = local.height() * scale;

        prop_assert!(width <= pixel.width() * (1.0 + 1e-12));
        prop_assert!(height <= pixel.height() * (1.0 + 1e-12));
        let spans_x = (width - pixel.width()).abs() <= 1e-9 * pixel.width();
        let spans_y = (height - pixel.height()).abs() <= 1e-9 * pixel.height();
        prop_assert!(spans_x || spans_y);
    }

    #[test]
    fn prop_apply_scale_preserves_anchor(
        ax in 0.0..800.0f64,
        ay in 0.0..600.0f64,
        factor in 0.5..2.0f64,
    ) {
        let ops = large_world_ops();
        let mut view = scenario_viewport();
        let anchor = Point::new(ax, ay);
        let global = view.p_to_g(anchor);

        prop_assert!(ops.apply_scale(anchor, factor, &mut view));
        prop_assert!(view.g_to_p(global).distance_to(&anchor) < 1e-6);
    }

    #[test]
    fn prop_apply_scale_rejection_leaves_view_unchanged(
        ax in 0.0..800.0f64,
        ay in 0.0..600.0f64,
        zoom_in in any::<bool>(),
        magnitude in 0.0..1.0f64,
    ) {
        let ops = large_world_ops();
        let mut view = scenario_viewport();
        let before = view.clone();
        // Either far past the deepest level or far past the whole world.
        let factor = if zoom_in { 1e7 * (1.0 + 99.0 * magnitude) } else { 1e-4 + 0.04 * magnitude };

        prop_assert!(!ops.apply_scale(Point::new(ax, ay), factor, &mut view));
        prop_assert_eq!(view, before);
    }

    #[test]
    fn prop_calculate_center_overloads_agree(
        view in arb_viewport(),
        ux in -500.0..500.0f64,
        uy in -500.0..500.0f64,
        px in 0.0..800.0f64,
        py in 0.0..600.0f64,
        azimuth in 0.0..TAU,
    ) {
        let user = Point::new(ux, uy);
        let pixel = Point::new(px, py);
        prop_assert_eq!(
            calculate_center(&view, user, pixel, azimuth),
            calculate_center_with(view.scale(), &view.pixel_rect(), user, pixel, azimuth)
        );
    }
}
