//! Accumulated affine placement for SDF shapes.

use glam::{Mat4, Vec3};

/// Accumulated translate/rotate/scale placement of a shape.
///
/// Operations compose the same way a scene graph does: each call
/// post-multiplies the current matrix, so `add_translation` followed by
/// `add_rotation` rotates the shape about its own (already translated)
/// origin. Sampling uses the inverse, mapping world points into the shape's
/// local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOp {
    matrix: Mat4,
    inverse: Mat4,
}

impl Default for TransformOp {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformOp {
    /// Identity transform
    pub fn new() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
        }
    }

    /// Identity transform followed by a translation
    pub fn from_translation(t: Vec3) -> Self {
        let mut op = Self::new();
        op.add_translation(t);
        op
    }

    pub fn add_translation(&mut self, t: Vec3) -> &mut Self {
        self.post_multiply(Mat4::from_translation(t))
    }

    /// Rotate by `angle` radians about `axis` (need not be normalized).
    pub fn add_rotation(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.post_multiply(Mat4::from_axis_angle(axis.normalize(), angle))
    }

    pub fn add_scale(&mut self, scale: Vec3) -> &mut Self {
        self.post_multiply(Mat4::from_scale(scale))
    }

    /// Map a world-space point into the shape's local space.
    #[inline]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.inverse.transform_point3(point)
    }

    /// Map a local-space point out to world space.
    ///
    /// Used to find anchors on an already placed shape, e.g. a branch
    /// origin on a tilted trunk.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Forward (local to world) matrix
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    fn post_multiply(&mut self, m: Mat4) -> &mut Self {
        self.matrix *= m;
        self.inverse = self.matrix.inverse();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity() {
        let op = TransformOp::new();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq(op.apply(p), p);
        assert_vec_eq(op.transform_point(p), p);
    }

    #[test]
    fn test_translation_moves_shape() {
        let op = TransformOp::from_translation(Vec3::new(10.0, 0.0, 0.0));
        // The shape's origin now sits at x = 10
        assert_vec_eq(op.apply(Vec3::new(10.0, 0.0, 0.0)), Vec3::ZERO);
        assert_vec_eq(op.transform_point(Vec3::ZERO), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_translate_then_rotate() {
        let mut op = TransformOp::new();
        op.add_translation(Vec3::new(5.0, 0.0, 0.0))
            .add_rotation(std::f32::consts::FRAC_PI_2, Vec3::Z);

        // Local +X points along world +Y after the rotation, about the translated origin
        assert_vec_eq(op.transform_point(Vec3::X), Vec3::new(5.0, 1.0, 0.0));
        assert_vec_eq(op.apply(Vec3::new(5.0, 1.0, 0.0)), Vec3::X);
    }

    #[test]
    fn test_scale() {
        let mut op = TransformOp::new();
        op.add_scale(Vec3::new(1.0, 1.0, 0.5));
        assert_vec_eq(op.apply(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(0.0, 0.0, 2.0));
        assert_vec_eq(op.transform_point(Vec3::new(0.0, 0.0, 2.0)), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_apply_inverts_transform_point() {
        let mut op = TransformOp::new();
        op.add_translation(Vec3::new(1.0, -2.0, 3.0))
            .add_rotation(0.7, Vec3::new(1.0, 1.0, 0.0))
            .add_scale(Vec3::new(2.0, 1.0, 0.5));

        let p = Vec3::new(0.3, 0.4, -0.8);
        assert_vec_eq(op.apply(op.transform_point(p)), p);
    }
}
