//! Per-process equipment and labor parameters
//!
//! Parameters are admin-supplied configuration, consumed by the estimator as
//! an immutable point-in-time snapshot. The layer-height rate table is an
//! explicit value passed into every estimation call; there is no ambient or
//! global rate lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::process::{LAYER_HEIGHT_EPSILON, Process};

/// Default minimum-density fraction for the FDM mass model
///
/// Regardless of how low the infill is set, the deposited mass never drops
/// below this fraction of the material's nominal density. The floor stands in
/// for the shell (walls, top and bottom surfaces) that is printed solid even
/// in a nearly hollow part; the exact factor is a heuristic carried over from
/// shop practice, which is why it is an overridable parameter field rather
/// than a hard-coded constant.
pub const DEFAULT_MIN_DENSITY_FRACTION: f64 = 0.2;

/// One entry in a layer-height rate table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRate {
    /// Layer height this rate applies to, in millimeters
    pub layer_height_mm: f64,
    /// Machine rate per hour at this layer height, currency-neutral
    pub hourly_rate: f64,
}

/// An explicit, immutable layer-height to hourly-rate table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerRateTable(Vec<LayerRate>);

impl LayerRateTable {
    /// Create a table from its entries
    pub fn new(entries: Vec<LayerRate>) -> Self {
        Self(entries)
    }

    /// The table's entries
    pub fn entries(&self) -> &[LayerRate] {
        &self.0
    }

    /// Look up the hourly rate for a layer height
    ///
    /// Matches entries within a small tolerance; returns `None` when no entry
    /// applies, in which case the estimator falls back to the generic rate.
    pub fn resolve(&self, layer_height_mm: f64) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| (entry.layer_height_mm - layer_height_mm).abs() < LAYER_HEIGHT_EPSILON)
            .map(|entry| entry.hourly_rate)
    }
}

impl From<Vec<(f64, f64)>> for LayerRateTable {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(layer_height_mm, hourly_rate)| LayerRate {
                    layer_height_mm,
                    hourly_rate,
                })
                .collect(),
        )
    }
}

/// Equipment and labor rates for one process
///
/// Time-model coefficients that do not apply to a process are simply left at
/// zero in that process's entry; the estimator only reads the fields its
/// branch uses. All monetary fields are currency-neutral decimal units,
/// convertible by a caller-supplied factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Generic fallback machine rate per hour, used when the layer-rate table
    /// has no entry for the selected layer height
    pub hourly_rate: Option<f64>,
    /// Layer-height specific machine rates
    pub layer_rates: LayerRateTable,
    /// Flat labor cost added to every quote
    pub labor_cost: f64,

    // FDM time model: three additive terms covering material deposition,
    // per-layer head travel, and perimeter/surface tracing.
    /// Hours per gram of deposited material
    pub grams_time_coeff: f64,
    /// Hours per printed layer
    pub layer_time_coeff: f64,
    /// Hours per square centimeter of surface
    pub surface_time_coeff: f64,
    /// Lower bound on the FDM time estimate, in hours
    pub minimum_time_hours: f64,
    /// Support-material surcharge per square centimeter of surface
    pub support_rate_per_cm2: f64,

    // Vat-photopolymerization time model.
    /// Cure/exposure seconds per layer
    pub exposure_sec_per_layer: f64,
    /// Seconds of vat-separation and lift/retract motion between layers;
    /// differs between the laser-scanned and projected-image mechanisms
    pub mechanical_overhead_sec: f64,
    /// Flat consumables cost (vat wear, wash fluid)
    pub consumables_cost: f64,
    /// Surcharge applied when post-processing is enabled
    pub post_process_rate: f64,

    /// Minimum shell-mass fraction of nominal density, see
    /// [`DEFAULT_MIN_DENSITY_FRACTION`]
    pub min_density_fraction: f64,
}

impl ProcessParameters {
    /// Default rates for filament deposition
    pub fn fdm_defaults() -> Self {
        Self {
            hourly_rate: Some(2.0),
            layer_rates: vec![
                (0.1, 3.0),
                (0.15, 2.5),
                (0.2, 2.0),
                (0.25, 1.8),
                (0.3, 1.5),
            ]
            .into(),
            labor_cost: 5.0,
            grams_time_coeff: 0.015,
            layer_time_coeff: 0.002,
            surface_time_coeff: 0.004,
            minimum_time_hours: 0.25,
            support_rate_per_cm2: 0.05,
            exposure_sec_per_layer: 0.0,
            mechanical_overhead_sec: 0.0,
            consumables_cost: 0.0,
            post_process_rate: 0.0,
            min_density_fraction: DEFAULT_MIN_DENSITY_FRACTION,
        }
    }

    /// Default rates for laser-scanned stereolithography
    pub fn sla_defaults() -> Self {
        Self {
            hourly_rate: Some(3.0),
            layer_rates: vec![(0.025, 4.0), (0.05, 3.5), (0.1, 3.0)].into(),
            labor_cost: 7.5,
            grams_time_coeff: 0.0,
            layer_time_coeff: 0.0,
            surface_time_coeff: 0.0,
            minimum_time_hours: 0.0,
            support_rate_per_cm2: 0.0,
            exposure_sec_per_layer: 6.0,
            mechanical_overhead_sec: 4.0,
            consumables_cost: 1.5,
            post_process_rate: 10.0,
            min_density_fraction: DEFAULT_MIN_DENSITY_FRACTION,
        }
    }

    /// Default rates for projected-image resin printing
    ///
    /// Whole-layer exposure makes the cure time shorter than SLA's
    /// laser scan; the peel motion is also quicker.
    pub fn dlp_defaults() -> Self {
        Self {
            exposure_sec_per_layer: 2.5,
            mechanical_overhead_sec: 3.0,
            ..Self::sla_defaults()
        }
    }

    /// Default rates for the given process
    pub fn defaults_for(process: Process) -> Self {
        match process {
            Process::Fdm => Self::fdm_defaults(),
            Process::Sla => Self::sla_defaults(),
            Process::Dlp => Self::dlp_defaults(),
        }
    }
}

/// Read-only view over per-process parameters
///
/// Backed by the admin configuration surface. `get` hands out a reference
/// into the store; callers that compute quotes concurrently with
/// configuration edits should take a [`snapshot`](ParameterStore::snapshot)
/// instead, so one quote never mixes two configuration versions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterStore {
    parameters: HashMap<Process, ProcessParameters>,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with default parameters for all three processes
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        for process in [Process::Fdm, Process::Sla, Process::Dlp] {
            store.insert(process, ProcessParameters::defaults_for(process));
        }
        store
    }

    /// Insert or replace the parameters for a process
    pub fn insert(&mut self, process: Process, parameters: ProcessParameters) {
        self.parameters.insert(process, parameters);
    }

    /// Get the parameters for a process
    pub fn get(&self, process: Process) -> Result<&ProcessParameters> {
        self.parameters
            .get(&process)
            .ok_or_else(|| Error::ConfigurationNotFound(process.key().to_string()))
    }

    /// Clone a point-in-time parameter snapshot for a process
    pub fn snapshot(&self, process: Process) -> Result<ProcessParameters> {
        self.get(process).cloned()
    }
}

/// A named parameter bundle: every field optional
///
/// Fields left as `None` preserve the current value during
/// [`apply_preset`]; present fields overwrite it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterPreset {
    /// Replacement fallback machine rate (`Some(None)` is not expressible;
    /// presets replace the whole Option)
    pub hourly_rate: Option<Option<f64>>,
    /// Replacement layer-rate table
    pub layer_rates: Option<LayerRateTable>,
    /// Replacement labor cost
    pub labor_cost: Option<f64>,
    /// Replacement hours-per-gram coefficient
    pub grams_time_coeff: Option<f64>,
    /// Replacement hours-per-layer coefficient
    pub layer_time_coeff: Option<f64>,
    /// Replacement hours-per-cm2 coefficient
    pub surface_time_coeff: Option<f64>,
    /// Replacement minimum time
    pub minimum_time_hours: Option<f64>,
    /// Replacement support surcharge
    pub support_rate_per_cm2: Option<f64>,
    /// Replacement exposure seconds per layer
    pub exposure_sec_per_layer: Option<f64>,
    /// Replacement mechanical overhead seconds
    pub mechanical_overhead_sec: Option<f64>,
    /// Replacement consumables cost
    pub consumables_cost: Option<f64>,
    /// Replacement post-processing surcharge
    pub post_process_rate: Option<f64>,
    /// Replacement minimum-density fraction
    pub min_density_fraction: Option<f64>,
}

/// Merge a preset onto current parameters
///
/// Pure overwrite-merge: every field present in `preset` replaces the
/// corresponding field in `current`; absent fields are preserved. Neither
/// input is mutated, and applying the same preset twice is a no-op after the
/// first application.
pub fn apply_preset(current: &ProcessParameters, preset: &ParameterPreset) -> ProcessParameters {
    let mut merged = current.clone();
    if let Some(hourly_rate) = preset.hourly_rate {
        merged.hourly_rate = hourly_rate;
    }
    if let Some(layer_rates) = &preset.layer_rates {
        merged.layer_rates = layer_rates.clone();
    }
    if let Some(labor_cost) = preset.labor_cost {
        merged.labor_cost = labor_cost;
    }
    if let Some(grams_time_coeff) = preset.grams_time_coeff {
        merged.grams_time_coeff = grams_time_coeff;
    }
    if let Some(layer_time_coeff) = preset.layer_time_coeff {
        merged.layer_time_coeff = layer_time_coeff;
    }
    if let Some(surface_time_coeff) = preset.surface_time_coeff {
        merged.surface_time_coeff = surface_time_coeff;
    }
    if let Some(minimum_time_hours) = preset.minimum_time_hours {
        merged.minimum_time_hours = minimum_time_hours;
    }
    if let Some(support_rate_per_cm2) = preset.support_rate_per_cm2 {
        merged.support_rate_per_cm2 = support_rate_per_cm2;
    }
    if let Some(exposure_sec_per_layer) = preset.exposure_sec_per_layer {
        merged.exposure_sec_per_layer = exposure_sec_per_layer;
    }
    if let Some(mechanical_overhead_sec) = preset.mechanical_overhead_sec {
        merged.mechanical_overhead_sec = mechanical_overhead_sec;
    }
    if let Some(consumables_cost) = preset.consumables_cost {
        merged.consumables_cost = consumables_cost;
    }
    if let Some(post_process_rate) = preset.post_process_rate {
        merged.post_process_rate = post_process_rate;
    }
    if let Some(min_density_fraction) = preset.min_density_fraction {
        merged.min_density_fraction = min_density_fraction;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_rate_table_resolve() {
        let table = LayerRateTable::from(vec![(0.1, 3.0), (0.2, 2.0)]);
        assert_eq!(table.resolve(0.2), Some(2.0));
        assert_eq!(table.resolve(0.1), Some(3.0));
        assert_eq!(table.resolve(0.15), None);
    }

    #[test]
    fn test_store_get_missing_process() {
        let mut store = ParameterStore::new();
        store.insert(Process::Fdm, ProcessParameters::fdm_defaults());

        assert!(store.get(Process::Fdm).is_ok());
        let err = store.get(Process::Dlp).unwrap_err();
        assert!(matches!(err, Error::ConfigurationNotFound(_)));
        assert!(err.to_string().contains("dlp"));
    }

    #[test]
    fn test_store_with_defaults_covers_all_processes() {
        let store = ParameterStore::with_defaults();
        for process in [Process::Fdm, Process::Sla, Process::Dlp] {
            assert!(store.get(process).is_ok(), "missing {}", process.key());
        }
        // The two light-curing mechanisms carry different between-layer motion
        let sla = store.get(Process::Sla).unwrap();
        let dlp = store.get(Process::Dlp).unwrap();
        assert_ne!(sla.mechanical_overhead_sec, dlp.mechanical_overhead_sec);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut store = ParameterStore::with_defaults();
        let snapshot = store.snapshot(Process::Fdm).unwrap();

        let mut edited = ProcessParameters::fdm_defaults();
        edited.labor_cost = 99.0;
        store.insert(Process::Fdm, edited);

        assert_eq!(snapshot.labor_cost, ProcessParameters::fdm_defaults().labor_cost);
    }

    #[test]
    fn test_apply_empty_preset_is_identity() {
        let current = ProcessParameters::sla_defaults();
        let merged = apply_preset(&current, &ParameterPreset::default());
        assert_eq!(merged, current);
    }

    #[test]
    fn test_apply_preset_overwrites_only_present_fields() {
        let current = ProcessParameters::fdm_defaults();
        let preset = ParameterPreset {
            labor_cost: Some(12.0),
            minimum_time_hours: Some(0.5),
            ..Default::default()
        };
        let merged = apply_preset(&current, &preset);

        assert_eq!(merged.labor_cost, 12.0);
        assert_eq!(merged.minimum_time_hours, 0.5);
        assert_eq!(merged.grams_time_coeff, current.grams_time_coeff);
        assert_eq!(merged.layer_rates, current.layer_rates);
    }

    #[test]
    fn test_apply_preset_is_idempotent() {
        let current = ProcessParameters::fdm_defaults();
        let preset = ParameterPreset {
            hourly_rate: Some(Some(4.5)),
            support_rate_per_cm2: Some(0.07),
            ..Default::default()
        };
        let once = apply_preset(&current, &preset);
        let twice = apply_preset(&once, &preset);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_preset_does_not_mutate_inputs() {
        let current = ProcessParameters::fdm_defaults();
        let preset = ParameterPreset {
            labor_cost: Some(1.0),
            ..Default::default()
        };
        let _ = apply_preset(&current, &preset);
        assert_eq!(current, ProcessParameters::fdm_defaults());
    }

    #[test]
    fn test_parameters_serde_round_trip() {
        let params = ProcessParameters::dlp_defaults();
        let json = serde_json::to_string(&params).unwrap();
        let back: ProcessParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
