//! Error types for mesh analysis and quote estimation
//!
//! All errors carry a bracketed code in their display message so that callers
//! (and logs kept by callers) can categorize failures without string matching.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: mesh and geometry input errors
//! - **E2xxx**: process and print-option selection errors
//! - **E3xxx**: configuration resolution errors

use thiserror::Error;

/// Result type for analysis and estimation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mesh analysis or quote estimation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Required mesh data is missing or malformed
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - A triangle index references a vertex outside the position buffer
    /// - The vertex-normal buffer length does not match the position buffer
    /// - Overhang classification requested without vertex normals
    #[error("[E1001] Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A derived geometry metric is non-finite or negative
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - NaN or infinite vertex coordinates propagated into the metrics
    /// - Metrics constructed by hand with negative values
    #[error("[E1002] Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The requested process key is not recognized
    ///
    /// **Error Code**: E2001
    ///
    /// Known keys are `fdm`, `sla`, and `dlp` (case-insensitive).
    #[error("[E2001] Unsupported process: {0}")]
    UnsupportedProcess(String),

    /// A user-selected print option is outside its allowed set
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Layer height not in the process's enumerated set
    /// - Non-finite infill percentage
    /// - Material with a non-positive density
    #[error("[E2002] Invalid print options: {0}")]
    InvalidOptions(String),

    /// No machine rate could be resolved for the selected layer height
    ///
    /// **Error Code**: E3001
    ///
    /// Raised when the layer-rate table has no matching entry and no generic
    /// hourly fallback rate is configured.
    #[error("[E3001] Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The requested process has no entry in the parameter store
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Configuration not found: {0}")]
    ConfigurationNotFound(String),
}

impl Error {
    /// Create an InvalidMesh error for an out-of-range triangle index
    pub fn index_out_of_range(triangle: usize, index: usize, vertex_count: usize) -> Self {
        Error::InvalidMesh(format!(
            "triangle {} references vertex {} but the mesh has only {} positions",
            triangle, index, vertex_count
        ))
    }

    /// Create an InvalidGeometry error for a metric field that failed validation
    pub fn invalid_metric(field: &str, value: f64) -> Self {
        Error::InvalidGeometry(format!(
            "metric '{}' must be finite and non-negative, got {}",
            field, value
        ))
    }
}
