//! Shared mesh fixtures for integration tests

use nalgebra::{Point3, Vector3};
use printquote::TriangleMesh;

/// Axis-aligned cuboid at the origin, built as 12 unwelded sequential
/// triangle triples with flat per-face normals and outward winding.
pub fn flat_cuboid(w: f64, d: f64, h: f64) -> TriangleMesh {
    let corners = [
        [0.0, 0.0, 0.0],
        [w, 0.0, 0.0],
        [w, d, 0.0],
        [0.0, d, 0.0],
        [0.0, 0.0, h],
        [w, 0.0, h],
        [w, d, h],
        [0.0, d, h],
    ];
    let faces: [([usize; 4], [f64; 3]); 6] = [
        ([0, 3, 2, 1], [0.0, 0.0, -1.0]), // bottom
        ([4, 5, 6, 7], [0.0, 0.0, 1.0]),  // top
        ([0, 1, 5, 4], [0.0, -1.0, 0.0]), // front
        ([2, 3, 7, 6], [0.0, 1.0, 0.0]),  // back
        ([0, 4, 7, 3], [-1.0, 0.0, 0.0]), // left
        ([1, 2, 6, 5], [1.0, 0.0, 0.0]),  // right
    ];

    let mut positions = Vec::with_capacity(36);
    let mut normals = Vec::with_capacity(36);
    for (quad, n) in &faces {
        for tri in [[0, 1, 2], [0, 2, 3]] {
            for &i in &tri {
                let c = corners[quad[i]];
                positions.push(Point3::new(c[0], c[1], c[2]));
                normals.push(Vector3::new(n[0], n[1], n[2]));
            }
        }
    }

    TriangleMesh {
        positions,
        normals: Some(normals),
        indices: None,
    }
}

/// The 10x10x10 mm reference cube: 1 cm3, 6 cm2, 1 cm2 of overhang.
pub fn reference_cube() -> TriangleMesh {
    flat_cuboid(10.0, 10.0, 10.0)
}
