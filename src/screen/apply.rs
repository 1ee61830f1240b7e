use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::screen::ScreenOperations;

impl ScreenOperations {
    /// Zooms `screen` by `factor` keeping the global point under the pixel
    /// `anchor` in place.
    ///
    /// Returns `None` when the zoomed view would leave the allowed scale
    /// range or could not be moved back inside the world. Border drift that
    /// translation can fix is corrected.
    pub fn try_apply_scale(&self, anchor: Point, factor: f64, screen: &Viewport) -> Option<Viewport> {
        if !(factor.is_finite() && factor > 0.0) {
            log::debug!("apply_scale: rejecting factor {}", factor);
            return None;
        }

        let global_anchor = screen.p_to_g(anchor);
        let mut next = screen.clone();
        if let Err(err) = next.zoom(factor) {
            log::debug!("apply_scale: {}", err);
            return None;
        }
        next.match_g_and_p(global_anchor, anchor);

        if !self.check_min_scale(&next) {
            log::debug!("apply_scale: scale {} is below the minimum", next.scale());
            return None;
        }
        if !self.check_max_scale(&next) {
            log::debug!("apply_scale: scale {} is above the maximum", next.scale());
            return None;
        }

        let world = self.config.world_rect;
        if !self.check_borders(&next) {
            if !self.can_shrink_into(&next, &world) {
                log::debug!("apply_scale: view {:?} cannot fit the world", next.clip_rect());
                return None;
            }
            next = self.shrink_into(&next, &world);
        }

        Some(next)
    }

    /// In-place form of [`try_apply_scale`](Self::try_apply_scale).
    ///
    /// On rejection `screen` is left untouched and `false` is returned.
    pub fn apply_scale(&self, anchor: Point, factor: f64, screen: &mut Viewport) -> bool {
        match self.try_apply_scale(anchor, factor, screen) {
            Some(next) => {
                *screen = next;
                true
            }
            None => false,
        }
    }
}
