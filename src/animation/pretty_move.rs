//! Builder for "pretty" view transitions
//!
//! A large change of position or scale is split into zoom out, move and zoom
//! in, so that the intermediate frames show both endpoints at a sensible
//! scale instead of sliding over unrelated ground at the wrong zoom. Small
//! changes are animated directly.

use crate::animation::sequence::{AnimationPhase, PhaseHook, PhaseKind, SequenceAnimation};
use crate::core::bounds::Bounds;
use crate::core::config::AnimationConfig;
use crate::core::constants::PRETTY_MOVE_ANIM;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::screen::calculate_scale;
use crate::{MapError, Result};
use std::time::Duration;

/// Changes below this relative size do not produce a phase
const PHASE_EPSILON: f64 = 1e-9;

/// Builds transition descriptions from an [`AnimationConfig`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionBuilder {
    config: AnimationConfig,
}

impl TransitionBuilder {
    pub fn new(config: AnimationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Time to pan `pixel_length` pixels on `screen`
    pub fn move_duration(&self, screen: &Viewport, pixel_length: f64) -> Duration {
        if pixel_length <= PHASE_EPSILON {
            return Duration::ZERO;
        }
        let min_side = min_side(&screen.pixel_rect());
        if pixel_length < self.config.min_speed_scalar * min_side {
            return seconds(self.config.min_move_duration_sec);
        }
        let pixel_speed = self.config.max_speed_scalar * min_side;
        seconds(pixel_length / pixel_speed)
    }

    /// Time to zoom between two scales
    pub fn scale_duration(&self, start_scale: f64, end_scale: f64) -> Duration {
        let ratio = scale_ratio(start_scale, end_scale);
        if ratio - 1.0 <= PHASE_EPSILON {
            return Duration::ZERO;
        }
        seconds(ratio / self.config.scale_speed)
    }

    /// Whether a transition needs the zoom out, move, zoom in treatment
    pub fn is_large_change(
        &self,
        screen: &Viewport,
        start_scale: f64,
        end_scale: f64,
        start_pt: Point,
        end_pt: Point,
    ) -> bool {
        if scale_ratio(start_scale, end_scale) >= self.config.pretty_scale_ratio {
            return true;
        }
        let pixel_travel = start_pt.distance_to(&end_pt) * start_scale.min(end_scale);
        pixel_travel > self.config.pretty_distance_factor * min_side(&screen.pixel_rect())
    }

    /// Scale at which both points stay visible with the configured margin
    fn overview_scale(&self, screen: &Viewport, start_pt: Point, end_pt: Point) -> f64 {
        let span = Bounds::from_points([start_pt, end_pt]);
        if span.width() <= 0.0 && span.height() <= 0.0 {
            return f64::INFINITY;
        }
        let pixel = screen.pixel_rect();
        let margin_x = pixel.width() * self.config.fit_margin;
        let margin_y = pixel.height() * self.config.fit_margin;
        calculate_scale(&pixel.inflated(-margin_x, -margin_y), &span)
    }

    /// Describes a transition from `start_pt` at `start_scale` to `end_pt` at
    /// `end_scale`, on a screen shaped like `screen`.
    ///
    /// `on_phase_start` is attached to the result and runs once per phase
    /// when whoever plays the sequence enters that phase.
    pub fn pretty_move(
        &self,
        screen: &Viewport,
        start_scale: f64,
        end_scale: f64,
        start_pt: Point,
        end_pt: Point,
        on_phase_start: Option<PhaseHook>,
    ) -> Result<SequenceAnimation> {
        for scale in [start_scale, end_scale] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(MapError::InvalidScale(scale));
            }
        }
        if !start_pt.is_finite() || !end_pt.is_finite() {
            return Err(MapError::InvalidViewport(format!(
                "transition endpoints must be finite, got {:?} and {:?}",
                start_pt, end_pt
            )));
        }

        let mut sequence = SequenceAnimation::new(PRETTY_MOVE_ANIM);
        if self.is_large_change(screen, start_scale, end_scale, start_pt, end_pt) {
            let overview = self.overview_scale(screen, start_pt, end_pt);
            let intermediate = start_scale.min(end_scale).min(overview);
            let zoom_limit = self.config.max_phase_duration() / 2;

            if scale_ratio(start_scale, intermediate) - 1.0 > PHASE_EPSILON {
                sequence = sequence.with_phase(self.phase(
                    PhaseKind::ZoomOut,
                    (start_pt, start_pt),
                    (start_scale, intermediate),
                    self.scale_duration(start_scale, intermediate).min(zoom_limit),
                ));
            }
            if start_pt.distance_to(&end_pt) > PHASE_EPSILON * start_pt.length().max(1.0) {
                let pixel_travel = start_pt.distance_to(&end_pt) * intermediate;
                sequence = sequence.with_phase(self.phase(
                    PhaseKind::Move,
                    (start_pt, end_pt),
                    (intermediate, intermediate),
                    self.move_duration(screen, pixel_travel)
                        .min(self.config.max_phase_duration()),
                ));
            }
            if scale_ratio(intermediate, end_scale) - 1.0 > PHASE_EPSILON {
                sequence = sequence.with_phase(self.phase(
                    PhaseKind::ZoomIn,
                    (end_pt, end_pt),
                    (intermediate, end_scale),
                    self.scale_duration(intermediate, end_scale).min(zoom_limit),
                ));
            }
        } else {
            let pixel_travel = start_pt.distance_to(&end_pt) * start_scale.min(end_scale);
            let duration = self
                .move_duration(screen, pixel_travel)
                .max(self.scale_duration(start_scale, end_scale))
                .min(self.config.max_phase_duration());
            sequence = sequence.with_phase(self.phase(
                PhaseKind::Direct,
                (start_pt, end_pt),
                (start_scale, end_scale),
                duration,
            ));
        }

        log::debug!(
            "pretty move {:?}@{} -> {:?}@{}: {} phase(s), {:?}",
            start_pt,
            start_scale,
            end_pt,
            end_scale,
            sequence.len(),
            sequence.total_duration()
        );
        Ok(sequence.on_phase_start(on_phase_start))
    }

    fn phase(
        &self,
        kind: PhaseKind,
        (start_center, end_center): (Point, Point),
        (start_scale, end_scale): (f64, f64),
        duration: Duration,
    ) -> AnimationPhase {
        AnimationPhase {
            kind,
            start_center,
            end_center,
            start_scale,
            end_scale,
            duration,
            easing: self.config.easing,
        }
    }
}

/// [`TransitionBuilder::pretty_move`] with the default configuration
pub fn pretty_move_animation(
    screen: &Viewport,
    start_scale: f64,
    end_scale: f64,
    start_pt: Point,
    end_pt: Point,
    on_phase_start: Option<PhaseHook>,
) -> Result<SequenceAnimation> {
    TransitionBuilder::default().pretty_move(
        screen,
        start_scale,
        end_scale,
        start_pt,
        end_pt,
        on_phase_start,
    )
}

/// Saturating conversion; callers clamp to the phase limits afterwards
fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

fn scale_ratio(a: f64, b: f64) -> f64 {
    (a / b).max(b / a)
}

fn min_side(rect: &Bounds) -> f64 {
    rect.width().min(rect.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn screen() -> Viewport {
        Viewport::new(
            Bounds::from_coords(0.0, 0.0, 800.0, 600.0),
            Point::ZERO,
            1.0,
            0.0,
        )
        .unwrap()
    }

    fn kinds(sequence: &SequenceAnimation) -> Vec<PhaseKind> {
        sequence.phases().iter().map(|phase| phase.kind).collect()
    }

    #[test]
    fn test_zoom_in_far_away_is_split() {
        let sequence = pretty_move_animation(
            &screen(),
            1.0,
            4.0,
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            None,
        )
        .unwrap();

        // Already zoomed out enough to see both points: no zoom out phase.
        assert_eq!(kinds(&sequence), vec![PhaseKind::Move, PhaseKind::ZoomIn]);
        assert_eq!(sequence.custom_type(), PRETTY_MOVE_ANIM);

        let start = sequence.start_frame().unwrap();
        let end = sequence.end_frame().unwrap();
        assert_eq!(start.center, Point::new(0.0, 0.0));
        assert_eq!(start.scale, 1.0);
        assert_eq!(end.center, Point::new(100.0, 100.0));
        assert_eq!(end.scale, 4.0);
        // Zooming by 4 takes 0.4 s at the default speed.
        assert!((sequence.phases()[1].duration.as_secs_f64() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_long_pan_zooms_out_first() {
        let sequence = pretty_move_animation(
            &screen(),
            1.0,
            1.0,
            Point::new(0.0, 0.0),
            Point::new(5000.0, 0.0),
            None,
        )
        .unwrap();

        assert_eq!(
            kinds(&sequence),
            vec![PhaseKind::ZoomOut, PhaseKind::Move, PhaseKind::ZoomIn]
        );
        let phases = sequence.phases();
        // 640 px of usable width over a 5000 unit span
        assert!((phases[0].end_scale - 0.128).abs() < 1e-12);
        assert_eq!(phases[1].start_scale, phases[1].end_scale);
        // Zoom phases are capped at half the maximum animation time.
        assert_eq!(phases[0].duration, Duration::from_secs_f64(0.75));
        assert_eq!(phases[2].duration, Duration::from_secs_f64(0.75));
    }

    #[test]
    fn test_small_change_is_direct() {
        let sequence = pretty_move_animation(
            &screen(),
            1.0,
            1.5,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            None,
        )
        .unwrap();

        assert_eq!(kinds(&sequence), vec![PhaseKind::Direct]);
        // Short travel uses the minimum move duration, longer than the zoom.
        assert_eq!(sequence.total_duration(), Duration::from_secs_f64(0.2));
    }

    #[test]
    fn test_invalid_scales_are_rejected() {
        let result = pretty_move_animation(&screen(), 0.0, 2.0, Point::ZERO, Point::ZERO, None);
        assert!(matches!(result, Err(MapError::InvalidScale(_))));

        let result = pretty_move_animation(&screen(), 1.0, f64::NAN, Point::ZERO, Point::ZERO, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_hook_is_attached() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hook: PhaseHook = Arc::new(move |phase: &AnimationPhase| {
            sink.lock().unwrap().push(phase.kind);
        });

        let sequence = pretty_move_animation(
            &screen(),
            1.0,
            4.0,
            Point::ZERO,
            Point::new(100.0, 100.0),
            Some(hook),
        )
        .unwrap();

        // Building never runs the hook.
        assert!(seen.lock().unwrap().is_empty());
        sequence.notify_phase_start(1);
        assert_eq!(*seen.lock().unwrap(), vec![PhaseKind::ZoomIn]);
    }

    #[test]
    fn test_custom_threshold() {
        let builder = TransitionBuilder::new(AnimationConfig {
            pretty_scale_ratio: 8.0,
            ..AnimationConfig::default()
        })
        .unwrap();

        let sequence = builder
            .pretty_move(&screen(), 1.0, 4.0, Point::ZERO, Point::new(100.0, 100.0), None)
            .unwrap();
        assert_eq!(kinds(&sequence), vec![PhaseKind::Direct]);
    }
}
