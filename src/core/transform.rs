//! Homogeneous 2D affine helpers on top of `nalgebra::Matrix3`.
//!
//! The viewport composes its pixel<->global mapping from these building blocks.

use crate::core::geo::Point;
use nalgebra::{Matrix3, Vector2};

pub type Affine = Matrix3<f64>;

pub fn translation(delta: Point) -> Affine {
    Matrix3::new_translation(&Vector2::from(delta))
}

pub fn rotation(angle: f64) -> Affine {
    Matrix3::new_rotation(angle)
}

pub fn scaling(sx: f64, sy: f64) -> Affine {
    Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy))
}

/// Maps a point through an affine matrix
pub fn apply(matrix: &Affine, point: Point) -> Point {
    matrix.transform_point(&point.into()).into()
}
