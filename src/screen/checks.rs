use crate::core::viewport::Viewport;
use crate::screen::fit::fits_into;
use crate::screen::ScreenOperations;

impl ScreenOperations {
    /// Fractional zoom level at which one tile of `tile_size * visual_scale`
    /// pixels covers `world_width / 2^level` global units at `scale`.
    fn tile_level(&self, scale: f64, tile_size: u32, visual_scale: f64) -> f64 {
        let tile_px = f64::from(tile_size) * visual_scale;
        (self.config.world_rect.width() * scale / tile_px).log2()
    }

    /// Zoom level used to pick tiles for `screen`; never below 1
    pub fn draw_tile_scale(&self, screen: &Viewport, tile_size: u32, visual_scale: f64) -> i32 {
        let level = self.tile_level(screen.scale(), tile_size, visual_scale).round();
        if level.is_finite() {
            (level as i32).max(1)
        } else {
            1
        }
    }

    /// Pixels per unit at zoom `level` for the configured tile parameters
    pub fn scale_for_level(&self, level: f64) -> f64 {
        let tile_px = f64::from(self.config.tile_size) * self.config.visual_scale;
        tile_px * 2_f64.powf(level) / self.config.world_rect.width()
    }

    /// False once the view shows more than the whole world along both axes
    pub fn check_min_scale(&self, screen: &Viewport) -> bool {
        let clip = screen.clip_rect();
        let world = &self.config.world_rect;
        clip.width() <= world.width() || clip.height() <= world.height()
    }

    pub fn check_max_scale(&self, screen: &Viewport) -> bool {
        self.check_max_scale_with(screen, self.config.tile_size, self.config.visual_scale)
    }

    /// False when tiles would have to be drawn deeper than the upper style scale,
    /// or when the tile parameters cannot measure a level at all
    pub fn check_max_scale_with(&self, screen: &Viewport, tile_size: u32, visual_scale: f64) -> bool {
        if tile_size == 0 || !(visual_scale.is_finite() && visual_scale > 0.0) {
            return false;
        }
        self.draw_tile_scale(screen, tile_size, visual_scale) <= self.config.upper_style_scale
    }

    /// True when everything on screen lies inside the world rect, up to
    /// floating point slack
    pub fn check_borders(&self, screen: &Viewport) -> bool {
        fits_into(&screen.clip_rect(), &self.config.world_rect)
    }
}
