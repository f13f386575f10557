use glam::Affine2;

use super::Vec2;

/// 2D affine transform (linear part + translation).
///
/// `translate`, `scale` and `rotate` concatenate on the *local* side: the new
/// operation is applied to points first, then everything that was already in
/// the transform. This is the usual 2D-graphics-context convention, so a
/// sequence of calls reads top-down from the outermost frame inwards.
///
/// ```
/// # use hierarchy_engine::coords::{Transform, Vec2};
/// let mut t = Transform::identity();
/// t.translate(10.0, 0.0);
/// t.scale(2.0, 2.0);
/// // scale first, then translate
/// assert_eq!(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(Affine2);

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self(Affine2::IDENTITY)
    }

    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.0 = self.0 * Affine2::from_translation(glam::vec2(tx, ty));
    }

    #[inline]
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.0 = self.0 * Affine2::from_scale(glam::vec2(sx, sy));
    }

    /// Rotates by `radians`. Positive angles turn +X towards +Y.
    #[inline]
    pub fn rotate(&mut self, radians: f32) {
        self.0 = self.0 * Affine2::from_angle(radians);
    }

    /// Appends `local` on the local side of `self`.
    #[inline]
    pub fn concat(&mut self, local: Transform) {
        self.0 = self.0 * local.0;
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        self.0.transform_point2(p.into()).into()
    }

    /// Decomposes into `(scale, angle, translation)`.
    ///
    /// Only meaningful for transforms without shear.
    #[inline]
    pub fn to_scale_angle_translation(self) -> (Vec2, f32, Vec2) {
        let (s, a, t) = self.0.to_scale_angle_translation();
        (s.into(), a, t.into())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn translate_then_scale_scales_first() {
        let mut t = Transform::identity();
        t.translate(10.0, 5.0);
        t.scale(2.0, 3.0);
        assert_eq!(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 8.0));
    }

    #[test]
    fn scale_then_translate_translates_in_scaled_frame() {
        let mut t = Transform::identity();
        t.scale(2.0, 3.0);
        t.translate(10.0, 5.0);
        assert_eq!(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(22.0, 18.0));
    }

    #[test]
    fn quarter_turn_maps_x_to_y() {
        let mut t = Transform::identity();
        t.rotate(core::f32::consts::FRAC_PI_2);
        assert!(close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn concat_matches_sequential_calls() {
        let mut a = Transform::identity();
        a.translate(1.0, 2.0);
        a.rotate(0.3);
        a.scale(4.0, 0.5);

        let mut local = Transform::identity();
        local.rotate(0.3);
        local.scale(4.0, 0.5);
        let mut b = Transform::identity();
        b.translate(1.0, 2.0);
        b.concat(local);

        let p = Vec2::new(0.7, -1.3);
        assert!(close(a.apply(p), b.apply(p)));
    }

    #[test]
    fn decomposition_recovers_parts() {
        let mut t = Transform::identity();
        t.translate(3.0, -2.0);
        t.rotate(0.5);
        t.scale(2.0, 2.0);
        let (s, a, tr) = t.to_scale_angle_translation();
        assert!(close(s, Vec2::new(2.0, 2.0)));
        assert!((a - 0.5).abs() < 1e-5);
        assert!(close(tr, Vec2::new(3.0, -2.0)));
    }
}
