//! Fabrication processes and user-selected print options
//!
//! Three additive-manufacturing technologies are modeled: filament deposition
//! (FDM) and two vat-photopolymerization variants distinguished by their
//! light-curing mechanism, laser-scanned (SLA) and projected-image (DLP).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Allowed FDM layer heights in millimeters
pub const FDM_LAYER_HEIGHTS_MM: [f64; 5] = [0.1, 0.15, 0.2, 0.25, 0.3];

/// Allowed SLA/DLP layer heights in millimeters
pub const RESIN_LAYER_HEIGHTS_MM: [f64; 3] = [0.025, 0.05, 0.1];

/// Tolerance when matching a layer height against an enumerated set
pub(crate) const LAYER_HEIGHT_EPSILON: f64 = 1e-9;

/// A fabrication process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Process {
    /// Fused deposition modeling (filament)
    Fdm,
    /// Stereolithography (laser-scanned resin)
    Sla,
    /// Digital light processing (projected-image resin)
    Dlp,
}

impl Process {
    /// Resolve a process from its external key
    ///
    /// Keys are matched case-insensitively. Anything other than `fdm`, `sla`,
    /// or `dlp` is [`Error::UnsupportedProcess`].
    pub fn from_key(key: &str) -> Result<Self> {
        match key.to_ascii_lowercase().as_str() {
            "fdm" => Ok(Process::Fdm),
            "sla" => Ok(Process::Sla),
            "dlp" => Ok(Process::Dlp),
            _ => Err(Error::UnsupportedProcess(key.to_string())),
        }
    }

    /// The canonical lowercase key for this process
    pub fn key(&self) -> &'static str {
        match self {
            Process::Fdm => "fdm",
            Process::Sla => "sla",
            Process::Dlp => "dlp",
        }
    }

    /// A human-readable name for this process
    pub fn name(&self) -> &'static str {
        match self {
            Process::Fdm => "Fused Deposition Modeling",
            Process::Sla => "Stereolithography",
            Process::Dlp => "Digital Light Processing",
        }
    }

    /// The enumerated layer heights this process accepts, in millimeters
    pub fn allowed_layer_heights_mm(&self) -> &'static [f64] {
        match self {
            Process::Fdm => &FDM_LAYER_HEIGHTS_MM,
            Process::Sla | Process::Dlp => &RESIN_LAYER_HEIGHTS_MM,
        }
    }

    /// Whether a layer height belongs to this process's allowed set
    pub fn allows_layer_height(&self, layer_height_mm: f64) -> bool {
        self.allowed_layer_heights_mm()
            .iter()
            .any(|&h| (h - layer_height_mm).abs() < LAYER_HEIGHT_EPSILON)
    }
}

/// A filament material, as configured on the admin surface
///
/// Density must be positive; the estimator rejects non-positive densities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialOption {
    /// Display name, e.g. "PLA"
    pub name: String,
    /// Density in grams per cubic centimeter
    pub density_g_cm3: f64,
    /// Unit price per gram, currency-neutral
    pub price_per_gram: f64,
}

impl MaterialOption {
    /// Create a new material option
    pub fn new(name: impl Into<String>, density_g_cm3: f64, price_per_gram: f64) -> Self {
        Self {
            name: name.into(),
            density_g_cm3,
            price_per_gram,
        }
    }
}

/// A photopolymer resin, as configured on the admin surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResinOption {
    /// Display name, e.g. "Standard Clear"
    pub name: String,
    /// Unit price per milliliter, currency-neutral (1 cm3 of model ~ 1 mL)
    pub price_per_ml: f64,
}

impl ResinOption {
    /// Create a new resin option
    pub fn new(name: impl Into<String>, price_per_ml: f64) -> Self {
        Self {
            name: name.into(),
            price_per_ml,
        }
    }
}

/// The user's process selection and its options
///
/// Serialized with an explicit `process` tag matching the external process
/// keys, so a persisted selection names its branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "process", rename_all = "lowercase")]
pub enum PrintOptions {
    /// Filament deposition options
    Fdm {
        /// Selected filament material
        material: MaterialOption,
        /// Infill percentage; clamped to [10, 100] by the estimator
        infill_percent: f64,
        /// Layer height in millimeters, from [`FDM_LAYER_HEIGHTS_MM`]
        layer_height_mm: f64,
        /// Whether support structures are generated
        supports_enabled: bool,
    },
    /// Laser-scanned resin options
    Sla {
        /// Selected resin
        resin: ResinOption,
        /// Layer height in millimeters, from [`RESIN_LAYER_HEIGHTS_MM`]
        layer_height_mm: f64,
        /// Whether wash/cure post-processing is included
        post_processing_enabled: bool,
    },
    /// Projected-image resin options
    Dlp {
        /// Selected resin
        resin: ResinOption,
        /// Layer height in millimeters, from [`RESIN_LAYER_HEIGHTS_MM`]
        layer_height_mm: f64,
        /// Whether wash/cure post-processing is included
        post_processing_enabled: bool,
    },
}

impl PrintOptions {
    /// The process these options select
    pub fn process(&self) -> Process {
        match self {
            PrintOptions::Fdm { .. } => Process::Fdm,
            PrintOptions::Sla { .. } => Process::Sla,
            PrintOptions::Dlp { .. } => Process::Dlp,
        }
    }

    /// The selected layer height in millimeters
    pub fn layer_height_mm(&self) -> f64 {
        match self {
            PrintOptions::Fdm { layer_height_mm, .. }
            | PrintOptions::Sla { layer_height_mm, .. }
            | PrintOptions::Dlp { layer_height_mm, .. } => *layer_height_mm,
        }
    }
}
