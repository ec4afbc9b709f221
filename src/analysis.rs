//! Mesh geometry analysis
//!
//! This module converts a [`TriangleMesh`] into the physical metrics the cost
//! estimator consumes:
//! - Volume via the divergence-theorem tetrahedron decomposition
//! - Surface area via triangle cross products
//! - Overhang area via face-orientation classification
//! - Axis-aligned bounding-box extents
//!
//! The analysis is a pure, deterministic, single pass over the triangles and
//! is safe to run concurrently on immutable meshes. The three accumulations
//! are associative, so a caller that needs to may partition triangles across
//! threads and sum the partial results.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mesh::TriangleMesh;

/// Downward-facing threshold on the face normal's z component
///
/// A face whose approximate normal has `z < -1/sqrt(2)` points more than 45
/// degrees below the horizontal and is counted as overhang.
pub const OVERHANG_Z_THRESHOLD: f64 = -std::f64::consts::FRAC_1_SQRT_2;

/// Physical metrics extracted from a triangle mesh
///
/// All fields are non-negative. The bounding box holds per-axis extents
/// (max minus min) in millimeters and is independent of triangle winding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryMetrics {
    /// Enclosed volume in cubic centimeters
    pub volume_cm3: f64,
    /// Total surface area in square centimeters
    pub surface_area_cm2: f64,
    /// Surface area oriented more than 45 degrees from vertical, pointing
    /// down, in square centimeters
    pub overhang_area_cm2: f64,
    /// Bounding-box extents per axis in millimeters
    pub bounding_box_mm: [f64; 3],
}

impl GeometryMetrics {
    /// Metrics of an empty mesh: everything zero
    pub fn zero() -> Self {
        Self {
            volume_cm3: 0.0,
            surface_area_cm2: 0.0,
            overhang_area_cm2: 0.0,
            bounding_box_mm: [0.0, 0.0, 0.0],
        }
    }
}

/// Approximate a triangle's face normal from its three vertex normals
///
/// Returns the normalized sum of the vertex normals, or the zero vector when
/// they cancel out. This is a cheap stand-in for the true geometric face
/// normal and is only adequate for coarse overhang classification; it is kept
/// separately named so it never masquerades as an exact normal.
pub fn approximate_face_normal(
    n0: &Vector3<f64>,
    n1: &Vector3<f64>,
    n2: &Vector3<f64>,
) -> Vector3<f64> {
    let sum = n0 + n1 + n2;
    let magnitude = sum.norm();
    if magnitude > 0.0 { sum / magnitude } else { Vector3::zeros() }
}

/// Compute the signed volume of a mesh in cubic millimeters
///
/// Sums the signed tetrahedron volumes formed by each triangle and the
/// origin. For a watertight mesh with outward winding the result is positive;
/// a negative result indicates predominantly inward winding. Exposed as an
/// orientation diagnostic; [`analyze_mesh`] uses the absolute value.
pub fn signed_volume_mm3(mesh: &TriangleMesh) -> Result<f64> {
    mesh.validate()?;

    let mut six_volume = 0.0_f64;
    for tri in mesh.triangles() {
        let [p0, p1, p2] = triangle_positions(mesh, tri);
        six_volume += p0.coords.dot(&p1.coords.cross(&p2.coords));
    }
    Ok(six_volume / 6.0)
}

/// Analyze a triangle mesh and produce its [`GeometryMetrics`]
///
/// A mesh with zero triangles yields all-zero metrics rather than an error.
/// Vertex normals are a precondition for overhang classification: a non-empty
/// mesh without a normal buffer (see
/// [`TriangleMesh::compute_vertex_normals`]) is rejected as
/// [`Error::InvalidMesh`], never silently classified.
///
/// Volume tolerates inconsistent winding by taking the absolute value of the
/// signed sum, at the cost of losing inside/outside detection.
pub fn analyze_mesh(mesh: &TriangleMesh) -> Result<GeometryMetrics> {
    mesh.validate()?;

    if mesh.is_empty() {
        return Ok(GeometryMetrics::zero());
    }

    let normals = mesh.normals.as_ref().ok_or_else(|| {
        Error::InvalidMesh(
            "vertex normals are required for overhang classification; \
             supply them or call compute_vertex_normals first"
            .to_string(),
        )
    })?;

    let mut six_volume = 0.0_f64;
    let mut double_area_mm2 = 0.0_f64;
    let mut overhang_area_mm2 = 0.0_f64;

    for tri in mesh.triangles() {
        let [p0, p1, p2] = triangle_positions(mesh, tri);

        six_volume += p0.coords.dot(&p1.coords.cross(&p2.coords));

        let double_area = (p1 - p0).cross(&(p2 - p0)).norm();
        double_area_mm2 += double_area;

        let face_normal =
            approximate_face_normal(&normals[tri[0]], &normals[tri[1]], &normals[tri[2]]);
        if face_normal.z < OVERHANG_Z_THRESHOLD {
            overhang_area_mm2 += 0.5 * double_area;
        }
    }

    // Extents over every position, winding-independent
    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &mesh.positions {
        min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }

    Ok(GeometryMetrics {
        volume_cm3: (six_volume / 6.0).abs() / 1000.0,
        surface_area_cm2: (double_area_mm2 / 2.0) / 100.0,
        overhang_area_cm2: overhang_area_mm2 / 100.0,
        bounding_box_mm: [max.x - min.x, max.y - min.y, max.z - min.z],
    })
}

// Callers go through validate() first, so indexing here cannot panic.
fn triangle_positions(mesh: &TriangleMesh, tri: [usize; 3]) -> [Point3<f64>; 3] {
    [
        mesh.positions[tri[0]],
        mesh.positions[tri[1]],
        mesh.positions[tri[2]],
    ]
}
