use crate::Vec3;

/// Right-handed orthonormal frame built around a single direction.
///
/// Used to rotate canonical hemisphere samples (expressed around +Z) into
/// world space around a surface normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Onb {
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Onb {
    /// Build a frame whose `w` axis is `n` normalized.
    ///
    /// The helper axis is X unless `n` is nearly parallel to it, in which
    /// case Y is used, so the cross products never degenerate.
    pub fn build_from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = v.cross(w);
        Self { u, v, w }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.u
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.v
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Map local coordinates `(a, b, c)` to `a*u + b*v + c*w`.
    #[inline]
    pub fn local(&self, a: f32, b: f32, c: f32) -> Vec3 {
        a * self.u + b * self.v + c * self.w
    }

    /// Map a local-frame vector to world space.
    #[inline]
    pub fn local_vec(&self, a: Vec3) -> Vec3 {
        self.local(a.x, a.y, a.z)
    }
}
