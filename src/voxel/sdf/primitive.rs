//! Distance functions for the canonical SDF shapes.
//!
//! All shapes are expressed in their own local space. Placement, rotation and
//! scaling are the job of [`TransformOp`](super::TransformOp), which maps world
//! points into this space before they reach these functions.

use glam::{Mat3, Vec3};

/// Maximum bend of a [`curved_cone`] at its tip when `curve_amount == 1.0`.
pub const CURVE_ANGLE_PER_UNIT: f32 = std::f32::consts::FRAC_PI_6;

/// Sphere of `radius` centered at the origin.
#[inline]
pub fn sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Flat-capped cylinder from `a` to `b`.
#[inline]
pub fn cylinder(p: Vec3, a: Vec3, b: Vec3, radius: f32) -> f32 {
    let ba = b - a;
    let pa = p - a;
    let baba = ba.dot(ba);
    let paba = pa.dot(ba);

    // Work in units scaled by |ba|^2 to avoid a sqrt per axis
    let x = (pa * baba - ba * paba).length() - radius * baba;
    let y = (paba - baba * 0.5).abs() - baba * 0.5;
    let x2 = x * x;
    let y2 = y * y * baba;

    let d = if x.max(y) < 0.0 {
        -x2.min(y2)
    } else {
        (if x > 0.0 { x2 } else { 0.0 }) + (if y > 0.0 { y2 } else { 0.0 })
    };
    d.signum() * d.abs().sqrt() / baba
}

/// Cone frustum from `a` (radius `ra`) to `b` (radius `rb`).
#[inline]
pub fn capped_cone(p: Vec3, a: Vec3, b: Vec3, ra: f32, rb: f32) -> f32 {
    let rba = rb - ra;
    let baba = (b - a).dot(b - a);
    let papa = (p - a).dot(p - a);
    let paba = (p - a).dot(b - a) / baba;

    let x = (papa - paba * paba * baba).max(0.0).sqrt();
    let cax = (x - if paba < 0.5 { ra } else { rb }).max(0.0);
    let cay = (paba - 0.5).abs() - 0.5;

    let k = rba * rba + baba;
    let f = ((rba * (x - ra) + paba * baba) / k).clamp(0.0, 1.0);
    let cbx = x - ra - f * rba;
    let cby = paba - f;

    let s = if cbx < 0.0 && cay < 0.0 { -1.0 } else { 1.0 };
    s * (cax * cax + cay * cay * baba)
        .min(cbx * cbx + cby * cby * baba)
        .sqrt()
}

/// Tapered cone along +X that bends towards +Z as it grows.
///
/// At distance `t = x / length` along the axis the cross-section is rotated
/// about Y by `curve_amount * CURVE_ANGLE_PER_UNIT * t^curve_power`, which
/// lifts the centerline. Outside `[0, length]` the axial overshoot is
/// returned; it never exceeds the true distance.
pub fn curved_cone(p: Vec3, length: f32, ra: f32, rb: f32, curve_amount: f32, curve_power: f32) -> f32 {
    if p.x < 0.0 {
        return -p.x;
    }
    if p.x > length {
        return p.x - length;
    }

    let t = p.x / length;
    let radius = ra + (rb - ra) * t;
    let angle = curve_amount * CURVE_ANGLE_PER_UNIT * t.powf(curve_power);
    let mut q = Mat3::from_rotation_y(angle) * p;
    q.x = 0.0;
    q.length() - radius
}

/// Axis-aligned box centered at the origin.
#[inline]
pub fn aabox(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
}

/// Sine roughening field. Not a distance; only meaningful as the second
/// operand of a displacement combine.
#[inline]
pub fn sine_displacement(p: Vec3, scale: Vec3, amount: f32) -> f32 {
    amount * ((p.x * scale.x).sin() + (p.y * scale.y).sin() + (p.z * scale.z).sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere() {
        assert_eq!(sphere(Vec3::new(5.0, 0.0, 0.0), 5.0), 0.0);
        assert_eq!(sphere(Vec3::ZERO, 5.0), -5.0);
        assert_eq!(sphere(Vec3::new(10.0, 0.0, 0.0), 5.0), 5.0);
        assert!((sphere(Vec3::new(3.0, 4.0, 0.0), 5.0)).abs() < 1e-6);
    }

    #[test]
    fn test_cylinder() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 0.0, 4.0);

        // On the axis, halfway up: inside by the radius
        let d = cylinder(Vec3::new(0.0, 0.0, 2.0), a, b, 1.0);
        assert!((d + 1.0).abs() < 1e-4, "got {}", d);

        // Beside the side wall
        let d = cylinder(Vec3::new(3.0, 0.0, 2.0), a, b, 1.0);
        assert!((d - 2.0).abs() < 1e-4, "got {}", d);

        // Above the flat cap
        let d = cylinder(Vec3::new(0.0, 0.0, 6.0), a, b, 1.0);
        assert!((d - 2.0).abs() < 1e-4, "got {}", d);
    }

    #[test]
    fn test_capped_cone() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 0.0, 10.0);

        assert!(capped_cone(Vec3::new(0.0, 0.0, 5.0), a, b, 2.0, 1.0) < 0.0);
        // Wide base, narrow top: a point at radius 1.8 is inside near the base only
        assert!(capped_cone(Vec3::new(1.8, 0.0, 0.5), a, b, 2.0, 1.0) < 0.0);
        assert!(capped_cone(Vec3::new(1.8, 0.0, 9.5), a, b, 2.0, 1.0) > 0.0);
        // Below the base cap
        let d = capped_cone(Vec3::new(0.0, 0.0, -3.0), a, b, 2.0, 1.0);
        assert!((d - 3.0).abs() < 1e-4, "got {}", d);
    }

    #[test]
    fn test_curved_cone_straight() {
        // No curve: plain tapered cone along X
        let d = curved_cone(Vec3::new(5.0, 0.0, 0.0), 10.0, 2.0, 1.0, 0.0, 1.0);
        assert!((d + 1.5).abs() < 1e-5, "got {}", d);
        let d = curved_cone(Vec3::new(5.0, 3.0, 0.0), 10.0, 2.0, 1.0, 0.0, 1.0);
        assert!((d - 1.5).abs() < 1e-5, "got {}", d);
    }

    #[test]
    fn test_curved_cone_outside_length() {
        assert_eq!(curved_cone(Vec3::new(-2.0, 0.0, 0.0), 10.0, 1.0, 1.0, 1.0, 1.0), 2.0);
        assert_eq!(curved_cone(Vec3::new(13.0, 0.0, 0.0), 10.0, 1.0, 1.0, 1.0, 1.0), 3.0);
    }

    #[test]
    fn test_curved_cone_bends_up() {
        // Near the tip a bent cone has its centerline above the X axis
        let straight = curved_cone(Vec3::new(9.0, 0.0, 3.0), 10.0, 1.0, 1.0, 0.0, 1.0);
        let bent = curved_cone(Vec3::new(9.0, 0.0, 3.0), 10.0, 1.0, 1.0, 1.0, 1.0);
        assert!(bent < straight);
    }

    #[test]
    fn test_aabox() {
        let h = Vec3::new(2.0, 1.0, 1.0);
        assert_eq!(aabox(Vec3::ZERO, h), -1.0);
        assert!((aabox(Vec3::new(3.0, 0.0, 0.0), h) - 1.0).abs() < 1e-6);
        assert!((aabox(Vec3::new(2.0, 0.0, 0.0), h)).abs() < 1e-6);
    }

    #[test]
    fn test_sine_displacement() {
        assert_eq!(sine_displacement(Vec3::ZERO, Vec3::ONE, 0.5), 0.0);
        let v = sine_displacement(Vec3::splat(std::f32::consts::FRAC_PI_2), Vec3::ONE, 0.5);
        assert!((v - 1.5).abs() < 1e-5);
    }
}
