//! # printquote
//!
//! Mesh geometry analysis and itemized cost/time estimation for
//! additive-manufacturing quoting.
//!
//! Given a triangulated 3D model and a chosen fabrication process (FDM, SLA,
//! or DLP) with its options, this crate computes physical metrics (volume,
//! surface area, overhang area, bounding box) and derives a deterministic,
//! itemized cost and time quote from admin-supplied per-process parameters.
//!
//! Both core operations are pure, synchronous functions over immutable
//! snapshots: safe to call concurrently, with no hidden state and no hidden
//! rounding. File-format decoding, persistence, and presentation are the
//! caller's concern.
//!
//! ## Example
//!
//! ```
//! use nalgebra::Point3;
//! use printquote::{
//!     analyze_mesh, estimate_quote, MaterialOption, ParameterStore, PrintOptions, Process,
//!     TriangleMesh,
//! };
//!
//! # fn main() -> printquote::Result<()> {
//! let mut mesh = TriangleMesh::new();
//! mesh.positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(0.0, 10.0, 0.0),
//! ];
//! mesh.compute_vertex_normals();
//!
//! let metrics = analyze_mesh(&mesh)?;
//!
//! let store = ParameterStore::with_defaults();
//! let options = PrintOptions::Fdm {
//!     material: MaterialOption::new("PLA", 1.24, 0.05),
//!     infill_percent: 40.0,
//!     layer_height_mm: 0.2,
//!     supports_enabled: false,
//! };
//! let quote = estimate_quote(&metrics, &options, store.get(Process::Fdm)?)?;
//!
//! println!("total: {:.2}, time: {:.2} h", quote.total, quote.estimated_time_hours);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod error;
pub mod estimator;
pub mod mesh;
pub mod params;
pub mod process;

pub use analysis::{
    GeometryMetrics, OVERHANG_Z_THRESHOLD, analyze_mesh, approximate_face_normal,
    signed_volume_mm3,
};
pub use error::{Error, Result};
pub use estimator::{MAX_INFILL_PERCENT, MIN_INFILL_PERCENT, Quote, estimate_quote};
pub use mesh::TriangleMesh;
pub use params::{
    DEFAULT_MIN_DENSITY_FRACTION, LayerRate, LayerRateTable, ParameterPreset, ParameterStore,
    ProcessParameters, apply_preset,
};
pub use process::{
    FDM_LAYER_HEIGHTS_MM, MaterialOption, PrintOptions, Process, RESIN_LAYER_HEIGHTS_MM,
    ResinOption,
};
