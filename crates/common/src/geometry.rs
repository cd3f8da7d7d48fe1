use serde::{Deserialize, Serialize};

/// Immutable triangle-list geometry: flattened `xyz` vertex triples plus `u16` indices.
///
/// Construction performs no validation. Malformed geometry is passed through
/// to the backend unchanged; callers that want a check opt in via [`Geometry::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    vertices: Vec<f32>,
    indices: Vec<u16>,
}

/// Problems found by [`Geometry::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry has no vertices")]
    NoVertices,
    #[error("geometry has no indices")]
    NoIndices,
    #[error("vertex array length {0} is not a multiple of 3")]
    RaggedVertices(usize),
    #[error("index {index} at position {at} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        at: usize,
        index: u16,
        vertex_count: usize,
    },
}

impl Geometry {
    pub fn new(vertices: Vec<f32>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    /// The demo quad: a 0.5 x 0.5 square with one corner at the origin.
    pub fn quad() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            0.0, 0.0, 0.0,
            0.0, 0.5, 0.0,
            0.5, 0.5, 0.0,
            0.5, 0.0, 0.0,
        ];
        Self::new(vertices, vec![0, 1, 2, 2, 3, 0])
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of complete `xyz` triples.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check the index invariant. Never called on the render path.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.is_empty() {
            return Err(GeometryError::NoVertices);
        }
        if self.indices.is_empty() {
            return Err(GeometryError::NoIndices);
        }
        if self.vertices.len() % 3 != 0 {
            return Err(GeometryError::RaggedVertices(self.vertices.len()));
        }
        let vertex_count = self.vertex_count();
        if let Some((at, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, i)| usize::from(**i) >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                at,
                index,
                vertex_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_valid() {
        let quad = Geometry::quad();
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.indices(), &[0, 1, 2, 2, 3, 0]);
        assert!(quad.validate().is_ok());
    }

    #[test]
    fn empty_geometry_is_accepted_but_fails_validation() {
        let g = Geometry::new(Vec::new(), Vec::new());
        assert!(g.vertices().is_empty());
        assert_eq!(g.validate(), Err(GeometryError::NoVertices));

        let g = Geometry::new(vec![0.0, 0.0, 0.0], Vec::new());
        assert_eq!(g.validate(), Err(GeometryError::NoIndices));
    }

    #[test]
    fn ragged_vertices_rejected() {
        let g = Geometry::new(vec![0.0, 1.0], vec![0]);
        assert_eq!(g.validate(), Err(GeometryError::RaggedVertices(2)));
    }

    #[test]
    fn out_of_range_index_reported_with_position() {
        let g = Geometry::new(vec![0.0; 9], vec![0, 1, 2, 3]);
        assert_eq!(
            g.validate(),
            Err(GeometryError::IndexOutOfRange {
                at: 3,
                index: 3,
                vertex_count: 3,
            })
        );
    }
}
