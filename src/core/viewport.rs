use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::core::transform::{self, Affine};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// The pixel<->global mapping currently in effect.
///
/// The pixel rect is in device pixels with y growing downwards; global
/// coordinates grow upwards. `org` is the global point shown at the center
/// of the pixel rect, `scale` is measured in pixels per global unit and
/// `angle` rotates the global plane relative to the screen (radians).
///
/// Both rectangles are guaranteed to have strictly positive extent and the
/// scale is finite and positive, so the mapping is always invertible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportRepr")]
pub struct Viewport {
    pixel_rect: Bounds,
    org: Point,
    scale: f64,
    angle: f64,
}

#[derive(Deserialize)]
struct ViewportRepr {
    pixel_rect: Bounds,
    org: Point,
    scale: f64,
    #[serde(default)]
    angle: f64,
}

impl TryFrom<ViewportRepr> for Viewport {
    type Error = MapError;

    fn try_from(repr: ViewportRepr) -> Result<Self> {
        Viewport::new(repr.pixel_rect, repr.org, repr.scale, repr.angle)
    }
}

/// Rotated rectangle of the global plane covered by the pixel rect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalRect {
    pub center: Point,
    /// Half width / half height in global units, before rotation
    pub half_size: Point,
    pub angle: f64,
}

impl GlobalRect {
    /// Unrotated size of the rectangle in global units
    pub fn local_size(&self) -> Point {
        self.half_size.multiply(2.0)
    }

    pub fn corners(&self) -> [Point; 4] {
        let Point { x: hx, y: hy } = self.half_size;
        [
            Point::new(-hx, -hy),
            Point::new(hx, -hy),
            Point::new(hx, hy),
            Point::new(-hx, hy),
        ]
        .map(|corner| self.center.add(&corner.rotate(self.angle)))
    }

    /// Axis-aligned box around the rotated rectangle
    pub fn bounding_box(&self) -> Bounds {
        Bounds::from_points(self.corners())
    }
}

fn check_pixel_rect(rect: &Bounds) -> Result<()> {
    if rect.is_degenerate() || !rect.min.is_finite() || !rect.max.is_finite() {
        return Err(MapError::InvalidViewport(format!(
            "pixel rect must have positive extent, got {:?}",
            rect
        )));
    }
    Ok(())
}

fn check_org(org: &Point) -> Result<()> {
    if !org.is_finite() {
        return Err(MapError::InvalidViewport(format!(
            "origin must be finite, got {:?}",
            org
        )));
    }
    Ok(())
}

fn check_angle(angle: f64) -> Result<()> {
    if !angle.is_finite() {
        return Err(MapError::InvalidViewport(format!(
            "angle must be finite, got {}",
            angle
        )));
    }
    Ok(())
}

fn check_scale(scale: f64) -> Result<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(MapError::InvalidScale(scale));
    }
    Ok(())
}

impl Viewport {
    /// Creates a viewport from its raw parameters
    pub fn new(pixel_rect: Bounds, org: Point, scale: f64, angle: f64) -> Result<Self> {
        check_pixel_rect(&pixel_rect)?;
        check_scale(scale)?;
        check_org(&org)?;
        check_angle(angle)?;

        Ok(Self {
            pixel_rect,
            org,
            scale,
            angle,
        })
    }

    /// Creates an unrotated viewport that fits `global_rect` into `pixel_rect`
    pub fn from_rects(pixel_rect: Bounds, global_rect: Bounds) -> Result<Self> {
        if global_rect.is_degenerate() {
            return Err(MapError::InvalidViewport(format!(
                "global rect must have positive extent, got {:?}",
                global_rect
            )));
        }
        check_pixel_rect(&pixel_rect)?;

        let scale = (pixel_rect.width() / global_rect.width())
            .min(pixel_rect.height() / global_rect.height());
        Self::new(pixel_rect, global_rect.center(), scale, 0.0)
    }

    pub fn pixel_rect(&self) -> Bounds {
        self.pixel_rect
    }

    /// Global point displayed at the center of the pixel rect
    pub fn org(&self) -> Point {
        self.org
    }

    /// Pixels per global unit
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation of the view in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_org(&mut self, org: Point) -> Result<()> {
        check_org(&org)?;
        self.org = org;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        check_scale(scale)?;
        self.scale = scale;
        Ok(())
    }

    pub fn set_angle(&mut self, angle: f64) -> Result<()> {
        check_angle(angle)?;
        self.angle = angle;
        Ok(())
    }

    pub fn set_pixel_rect(&mut self, pixel_rect: Bounds) -> Result<()> {
        check_pixel_rect(&pixel_rect)?;
        self.pixel_rect = pixel_rect;
        Ok(())
    }

    /// Multiplies the scale by `factor` around the current origin (> 1 zooms in)
    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        self.set_scale(self.scale * factor)
    }

    /// Translates the view by `delta` global units
    pub fn move_by(&mut self, delta: &Point) {
        self.org = self.org.add(delta);
    }

    /// Copy of this viewport re-centered on `center` at `scale`
    pub fn with_center_and_scale(&self, center: Point, scale: f64) -> Result<Viewport> {
        let mut viewport = self.clone();
        viewport.set_scale(scale)?;
        viewport.set_org(center)?;
        Ok(viewport)
    }

    /// Matrix mapping pixel coordinates to global coordinates
    pub fn p_to_g_matrix(&self) -> Affine {
        let inv_scale = 1.0 / self.scale;
        transform::translation(self.org)
            * transform::rotation(self.angle)
            * transform::scaling(inv_scale, -inv_scale)
            * transform::translation(self.pixel_rect.center().multiply(-1.0))
    }

    /// Matrix mapping global coordinates to pixel coordinates
    pub fn g_to_p_matrix(&self) -> Affine {
        transform::translation(self.pixel_rect.center())
            * transform::scaling(self.scale, -self.scale)
            * transform::rotation(-self.angle)
            * transform::translation(self.org.multiply(-1.0))
    }

    pub fn p_to_g(&self, pixel: Point) -> Point {
        transform::apply(&self.p_to_g_matrix(), pixel)
    }

    pub fn g_to_p(&self, global: Point) -> Point {
        transform::apply(&self.g_to_p_matrix(), global)
    }

    /// Moves the origin so that `global` is displayed at `pixel`
    pub fn match_g_and_p(&mut self, global: Point, pixel: Point) {
        let shift = global.subtract(&self.p_to_g(pixel));
        self.move_by(&shift);
    }

    /// Size of the pixel rect expressed in global units (unrotated)
    pub fn local_size(&self) -> Point {
        self.pixel_rect.size().multiply(1.0 / self.scale)
    }

    /// Rotated global rectangle covered by the view
    pub fn global_rect(&self) -> GlobalRect {
        GlobalRect {
            center: self.org,
            half_size: self.local_size().multiply(0.5),
            angle: self.angle,
        }
    }

    /// Axis-aligned global box that encloses everything on screen
    pub fn clip_rect(&self) -> Bounds {
        self.global_rect().bounding_box()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pixel_rect: Bounds::from_coords(0.0, 0.0, 800.0, 600.0),
            org: Point::ZERO,
            scale: 1.0,
            angle: 0.0,
        }
    }
}
