use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Represents a point in pixel or global (world) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        self.distance_to(&Point::ZERO)
    }

    /// Rotates the vector counter-clockwise by `angle` radians around the origin
    pub fn rotate(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Point> for Point2<f64> {
    fn from(point: Point) -> Self {
        Point2::new(point.x, point.y)
    }
}

impl From<Point2<f64>> for Point {
    fn from(point: Point2<f64>) -> Self {
        Point::new(point.x, point.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(point: Point) -> Self {
        Vector2::new(point.x, point.y)
    }
}
