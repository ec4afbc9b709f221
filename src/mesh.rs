//! Triangle mesh input type
//!
//! [`TriangleMesh`] is the normalized geometry handed to the analyzer by an
//! upstream loader: vertex positions in millimeters, optional unit vertex
//! normals, and an optional triangle index buffer. When no index buffer is
//! present, triangles are read as sequential position triples.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

/// A triangulated 3D model, positions in millimeters
///
/// Produced once per upload by an external loader and treated as an immutable
/// snapshot during analysis. A mesh with zero triangles is valid input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    /// Vertex positions in millimeters
    pub positions: Vec<Point3<f64>>,
    /// Optional unit vertex normals, one per position
    ///
    /// Required for overhang classification; fill with
    /// [`compute_vertex_normals`](TriangleMesh::compute_vertex_normals) when
    /// the loader does not supply them.
    pub normals: Option<Vec<Vector3<f64>>>,
    /// Optional triangle index buffer
    ///
    /// When absent, positions are consumed as sequential triples and a
    /// trailing partial triple is ignored.
    pub indices: Option<Vec<[usize; 3]>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mesh with pre-allocated position capacity
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: None,
            indices: None,
        }
    }

    /// Number of triangles, from the index buffer or sequential triples
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.positions.len() / 3,
        }
    }

    /// True when the mesh contains no triangles
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Iterate over triangle vertex indices
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles { mesh: self, next: 0 }
    }

    /// Check structural consistency of the buffers
    ///
    /// Verifies that every triangle index falls inside the position buffer and
    /// that a normal buffer, if present, matches the position count. The
    /// analyzer calls this before touching any coordinate.
    pub fn validate(&self) -> Result<()> {
        if let Some(indices) = &self.indices {
            for (t, tri) in indices.iter().enumerate() {
                for &i in tri {
                    if i >= self.positions.len() {
                        return Err(Error::index_out_of_range(t, i, self.positions.len()));
                    }
                }
            }
        }
        if let Some(normals) = &self.normals
            && normals.len() != self.positions.len()
        {
            return Err(Error::InvalidMesh(format!(
                "normal buffer has {} entries for {} positions",
                normals.len(),
                self.positions.len()
            )));
        }
        Ok(())
    }

    /// Compute area-weighted vertex normals and store them on the mesh
    ///
    /// For each vertex, accumulates the unnormalized cross product of every
    /// adjacent triangle (whose magnitude is twice the triangle area, giving
    /// area weighting for free) and normalizes the sum. Degenerate triangles
    /// contribute nothing; a vertex referenced by no valid triangle keeps a
    /// zero normal. Overwrites any existing normal buffer.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];

        for [i0, i1, i2] in self.triangles() {
            if i0 >= self.positions.len() || i1 >= self.positions.len() || i2 >= self.positions.len()
            {
                continue;
            }
            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];

            let area_weighted = (p1 - p0).cross(&(p2 - p0));
            if area_weighted.norm() > 0.0 {
                normals[i0] += area_weighted;
                normals[i1] += area_weighted;
                normals[i2] += area_weighted;
            }
        }

        for normal in &mut normals {
            let magnitude = normal.norm();
            if magnitude > 0.0 {
                *normal /= magnitude;
            }
        }

        self.normals = Some(normals);
    }
}

/// Iterator over the vertex indices of each triangle in a [`TriangleMesh`]
#[derive(Debug, Clone)]
pub struct Triangles<'a> {
    mesh: &'a TriangleMesh,
    next: usize,
}

impl Iterator for Triangles<'_> {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<[usize; 3]> {
        let item = match &self.mesh.indices {
            Some(indices) => indices.get(self.next).copied(),
            None => {
                let base = self.next * 3;
                if base + 2 < self.mesh.positions.len() {
                    Some([base, base + 1, base + 2])
                } else {
                    None
                }
            }
        };
        if item.is_some() {
            self.next += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mesh.triangle_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}
