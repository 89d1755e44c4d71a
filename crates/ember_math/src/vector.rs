//! Vector helpers shared by materials and the integrator.

use crate::Vec3;

/// RGB color, linear, nominally in [0, 1] but never clamped here.
pub type Color = Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Normalize `v`. A zero vector yields a zero vector instead of NaNs,
/// callers are expected not to pass degenerate input.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// True if every component is within 1e-8 of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Mirror `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// Splits the outgoing direction into components perpendicular and parallel
/// to `n` (Snell's law). `uv` must be unit length; total internal reflection
/// is the caller's responsibility to detect beforehand.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_vector_of_zero_is_zero() {
        assert_eq!(unit_vector(Vec3::ZERO), Vec3::ZERO);
        assert!((unit_vector(Vec3::new(3.0, 0.0, 4.0)).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_with_unit_ratio_passes_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.0);
        assert!((r - uv).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal_entering_denser_medium() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.0 / 1.5);

        // Snell: sin(theta_t) = sin(theta_i) / 1.5
        let sin_i = uv.x.abs();
        assert!((r.x - sin_i / 1.5).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }
}
