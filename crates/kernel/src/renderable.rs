use glam::{Mat4, Vec3};
use towerclimb_common::{Geometry, Transform};

/// A geometry bound to the transform that places it. The unit handed to the backend each frame.
#[derive(Debug, Clone)]
pub struct Renderable {
    geometry: Geometry,
    transform: Transform,
}

impl Renderable {
    /// Bind `geometry` to a transform starting at `position`. No validation is performed.
    pub fn new(position: Vec3, geometry: Geometry) -> Self {
        Self {
            geometry,
            transform: Transform::new(position),
        }
    }

    /// Move by `offset`, composing with every previous move. Returns the new matrix.
    pub fn move_by(&mut self, offset: Vec3) -> Mat4 {
        self.transform.move_by(offset)
    }

    pub fn vertices(&self) -> &[f32] {
        self.geometry.vertices()
    }

    pub fn indices(&self) -> &[u16] {
        self.geometry.indices()
    }

    /// Current cumulative translation matrix.
    pub fn translation(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_construction_buffers() {
        let r = Renderable::new(Vec3::ZERO, Geometry::quad());
        assert_eq!(r.vertices(), Geometry::quad().vertices());
        assert_eq!(r.indices(), &[0, 1, 2, 2, 3, 0]);
        assert_eq!(r.translation(), Mat4::IDENTITY);
    }

    #[test]
    fn moves_never_touch_geometry() {
        let mut r = Renderable::new(Vec3::new(0.1, 0.2, 0.0), Geometry::quad());
        for i in 0..250 {
            r.move_by(Vec3::new(i as f32 * 0.01, -0.02, 0.5));
        }
        assert_eq!(r.geometry(), &Geometry::quad());
    }

    #[test]
    fn move_by_delegates_to_transform() {
        let mut r = Renderable::new(Vec3::new(1.0, 0.0, 0.0), Geometry::quad());
        let m = r.move_by(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(m, r.translation());
        assert_eq!(r.transform().position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn garbage_geometry_passes_through() {
        let r = Renderable::new(Vec3::ZERO, Geometry::new(Vec::new(), vec![7, 9]));
        assert!(r.vertices().is_empty());
        assert_eq!(r.indices(), &[7, 9]);
    }
}
