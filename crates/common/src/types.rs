use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: a position and the cumulative translation matrix that produced it.
///
/// Moves compose: each call right-multiplies the current matrix by a new
/// translation, so the matrix always reflects every move since creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    position: Vec3,
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            matrix: Mat4::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a transform at `position`, applied as the first move onto identity.
    pub fn new(position: Vec3) -> Self {
        let mut transform = Self::default();
        transform.move_by(position);
        transform
    }

    /// Compose a translation by `offset` into the matrix. Returns the updated matrix.
    pub fn move_by(&mut self, offset: Vec3) -> Mat4 {
        self.matrix *= Mat4::from_translation(offset);
        self.position = self.matrix.w_axis.truncate();
        self.matrix
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Column-major matrix, the layout both WebGL and wgpu uniforms expect.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}

/// RGBA clear colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color4 {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Size of the drawable region in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Aspect ratio, guarding against a zero-height surface while minimised.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn new_applies_initial_position() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.matrix(), Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn moves_accumulate_instead_of_resetting() {
        let mut t = Transform::default();
        t.move_by(Vec3::new(1.0, 0.0, 0.0));
        let m = t.move_by(Vec3::new(0.0, 2.0, 0.0));

        // A reset would leave only the last offset.
        assert_ne!(m, Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn matrix_equals_composition_in_call_order() {
        let start = Vec3::new(0.5, -0.25, 0.0);
        let offsets = [
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(-0.3, 0.7, 0.0),
            Vec3::new(0.0, 0.0, 1.5),
            Vec3::new(0.001, -0.001, 0.0),
        ];

        let mut t = Transform::new(start);
        let mut expected = Mat4::from_translation(start);
        for offset in offsets {
            let m = t.move_by(offset);
            expected *= Mat4::from_translation(offset);
            assert!(m.abs_diff_eq(expected, 1e-6));
        }

        let total = offsets.iter().fold(start, |acc, o| acc + *o);
        assert!(t.position().abs_diff_eq(total, 1e-6));
    }

    #[test]
    fn color_to_array() {
        assert_eq!(Color4::default().to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color4::new(1.0, 0.5, 0.25, 0.0).to_array(), [1.0, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn viewport_aspect_handles_zero_height() {
        assert_eq!(Viewport::new(1280, 720).aspect(), 1280.0 / 720.0);
        assert_eq!(Viewport::new(100, 0).aspect(), 100.0);
    }
}
