//! Triangle mesh geometry loaded from OBJ files.
//!
//! Only what the renderer needs is kept: positions, triangle indices and
//! optional per-vertex colors. Unlike texture images, a mesh that fails to
//! parse is an error the caller has to handle.

use std::path::Path;

use ember_math::{Aabb, Color, Point3, Vec3};
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to parse OBJ file: {0}")]
    Load(#[from] tobj::LoadError),

    #[error("Mesh '{0}' contains no triangles")]
    Empty(String),

    #[error("Triangle index {index} out of range for {vertex_count} vertices")]
    InvalidIndex { index: u32, vertex_count: usize },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// A triangle mesh with optional vertex colors.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Point3>,

    /// Per-vertex colors, same length as `positions` when present
    pub colors: Option<Vec<Color>>,

    /// Every 3 indices form a triangle
    pub indices: Vec<u32>,

    pub bounds: Aabb,
}

impl Mesh {
    /// Build a mesh, validating that every index refers to a vertex.
    pub fn new(
        positions: Vec<Point3>,
        indices: Vec<u32>,
        colors: Option<Vec<Color>>,
    ) -> MeshResult<Self> {
        let vertex_count = positions.len();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::InvalidIndex {
                index,
                vertex_count,
            });
        }

        // Colors are only usable if there's one per vertex
        let colors = colors.filter(|c| c.len() == vertex_count);
        let bounds = Self::compute_bounds(&positions);

        Ok(Self {
            positions,
            colors,
            indices,
            bounds,
        })
    }

    /// Load every model in an OBJ file into a single triangulated mesh.
    pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut positions = Vec::new();
        let mut indices = Vec::new();
        let mut colors = Vec::new();
        let mut all_colored = true;

        for model in &models {
            let mesh = &model.mesh;
            let base = positions.len() as u32;

            positions.extend(mesh.positions.chunks_exact(3).map(Vec3::from_slice));
            indices.extend(mesh.indices.iter().map(|i| i + base));

            if mesh.vertex_color.len() == mesh.positions.len() {
                colors.extend(mesh.vertex_color.chunks_exact(3).map(Vec3::from_slice));
            } else {
                all_colored = false;
            }
        }

        if indices.len() < 3 {
            return Err(MeshError::Empty(path.display().to_string()));
        }

        let mesh = Self::new(positions, indices, all_colored.then_some(colors))?;

        log::info!(
            "Loaded mesh: {} ({} triangles, {} vertices, colors: {})",
            path.display(),
            mesh.triangle_count(),
            mesh.vertex_count(),
            mesh.has_colors()
        );

        Ok(mesh)
    }

    fn compute_bounds(positions: &[Point3]) -> Aabb {
        if positions.is_empty() {
            return Aabb::EMPTY;
        }

        let (min, max) = positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );

        Aabb::from_points(min, max)
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex indices of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("ember_core_mesh_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_mesh_creation() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = Mesh::new(positions, vec![0, 1, 2], None).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_colors());
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_invalid_index_is_rejected() {
        let err = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 3], None).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidIndex {
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_mismatched_colors_are_dropped() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
            Some(vec![Color::ONE]),
        )
        .unwrap();
        assert!(!mesh.has_colors());
    }

    #[test]
    fn test_bounds() {
        let positions = vec![
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2], None).unwrap();

        assert_eq!(mesh.bounds.x.min, -1.0);
        assert_eq!(mesh.bounds.y.max, 5.0);
        assert_eq!(mesh.bounds.z.min, -3.0);
    }

    #[test]
    fn test_load_obj_quad_is_triangulated() {
        let path = write_obj(
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let mesh = Mesh::load_obj(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.has_colors());
    }

    #[test]
    fn test_load_obj_vertex_colors() {
        let path = write_obj(
            "colored.obj",
            "v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n",
        );
        let mesh = Mesh::load_obj(&path).unwrap();
        let colors = mesh.colors.as_ref().unwrap();
        assert_eq!(colors[1], Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_load_missing_obj_fails() {
        let err = Mesh::load_obj("no/such/dino.obj").unwrap_err();
        assert!(matches!(err, MeshError::Load(_)));
    }

    #[test]
    fn test_load_obj_without_faces_is_empty() {
        let path = write_obj("points.obj", "v 0 0 0\nv 1 0 0\n");
        assert!(Mesh::load_obj(&path).is_err());
    }
}
