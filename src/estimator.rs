//! Itemized cost and time estimation
//!
//! [`estimate_quote`] combines geometry metrics, the user's process options,
//! and a per-process parameter snapshot into a [`Quote`]. It is a pure
//! function: no internal state, same inputs always produce the same output,
//! and the total is the exact sum of the itemized components with no hidden
//! rounding before presentation.
//!
//! Validation contract, applied once here and nowhere else:
//! - Every geometry metric must be finite and non-negative
//!   ([`Error::InvalidGeometry`]); physical metrics are never clamped.
//! - The layer height must belong to the process's enumerated set
//!   ([`Error::InvalidOptions`]).
//! - `infill_percent` is the one clamped input: values outside [10, 100] are
//!   pulled to the nearest bound.

use serde::{Deserialize, Serialize};

use crate::analysis::GeometryMetrics;
use crate::error::{Error, Result};
use crate::params::ProcessParameters;
use crate::process::{MaterialOption, PrintOptions, ResinOption};

/// Lower clamp bound for the FDM infill percentage
pub const MIN_INFILL_PERCENT: f64 = 10.0;

/// Upper clamp bound for the FDM infill percentage
pub const MAX_INFILL_PERCENT: f64 = 100.0;

/// An itemized cost and time quote for one geometry + process + options
///
/// All fields are non-negative; `total` is exactly
/// `material_cost + secondary_cost + machine_cost + labor_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Cost of the consumed material (filament mass or resin volume)
    pub material_cost: f64,
    /// Process-specific surcharge: support material for FDM, consumables
    /// plus optional post-processing for SLA/DLP
    pub secondary_cost: f64,
    /// Machine time cost at the resolved hourly rate
    pub machine_cost: f64,
    /// Flat labor cost from the process parameters
    pub labor_cost: f64,
    /// Exact sum of the four itemized components
    pub total: f64,
    /// Estimated build time in hours
    pub estimated_time_hours: f64,
    /// Number of slices at the selected layer height
    pub layer_count: u32,
    /// Material consumption: grams for FDM, milliliters for SLA/DLP
    pub material_consumed: f64,
}

/// Estimate an itemized quote
///
/// Pure and deterministic; see the module docs for the validation contract.
/// Fails with [`Error::MissingConfiguration`] when neither the layer-rate
/// table nor the generic hourly rate can price the selected layer height.
pub fn estimate_quote(
    metrics: &GeometryMetrics,
    options: &PrintOptions,
    params: &ProcessParameters,
) -> Result<Quote> {
    validate_metrics(metrics)?;

    let layer_height_mm = options.layer_height_mm();
    let process = options.process();
    if !process.allows_layer_height(layer_height_mm) {
        return Err(Error::InvalidOptions(format!(
            "layer height {} mm is not offered for {}; allowed: {:?}",
            layer_height_mm,
            process.key(),
            process.allowed_layer_heights_mm()
        )));
    }

    let machine_rate = resolve_machine_rate(params, layer_height_mm)?;
    let layer_count = layer_count(metrics.bounding_box_mm[2], layer_height_mm);

    match options {
        PrintOptions::Fdm {
            material,
            infill_percent,
            supports_enabled,
            ..
        } => fdm_quote(
            metrics,
            material,
            *infill_percent,
            *supports_enabled,
            layer_count,
            machine_rate,
            params,
        ),
        PrintOptions::Sla {
            resin,
            post_processing_enabled,
            ..
        }
        | PrintOptions::Dlp {
            resin,
            post_processing_enabled,
            ..
        } => Ok(resin_quote(
            metrics,
            resin,
            *post_processing_enabled,
            layer_count,
            machine_rate,
            params,
        )),
    }
}

fn validate_metrics(metrics: &GeometryMetrics) -> Result<()> {
    let fields = [
        ("volume_cm3", metrics.volume_cm3),
        ("surface_area_cm2", metrics.surface_area_cm2),
        ("overhang_area_cm2", metrics.overhang_area_cm2),
        ("bounding_box_mm[0]", metrics.bounding_box_mm[0]),
        ("bounding_box_mm[1]", metrics.bounding_box_mm[1]),
        ("bounding_box_mm[2]", metrics.bounding_box_mm[2]),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::invalid_metric(name, value));
        }
    }
    Ok(())
}

fn resolve_machine_rate(params: &ProcessParameters, layer_height_mm: f64) -> Result<f64> {
    params
        .layer_rates
        .resolve(layer_height_mm)
        .or(params.hourly_rate)
        .ok_or_else(|| {
            Error::MissingConfiguration(format!(
                "no machine rate for layer height {} mm and no hourly fallback",
                layer_height_mm
            ))
        })
}

fn layer_count(height_mm: f64, layer_height_mm: f64) -> u32 {
    ((height_mm / layer_height_mm).ceil() as u32).max(1)
}

fn fdm_quote(
    metrics: &GeometryMetrics,
    material: &MaterialOption,
    infill_percent: f64,
    supports_enabled: bool,
    layer_count: u32,
    machine_rate: f64,
    params: &ProcessParameters,
) -> Result<Quote> {
    if !material.density_g_cm3.is_finite() || material.density_g_cm3 <= 0.0 {
        return Err(Error::InvalidOptions(format!(
            "material '{}' has non-positive density {}",
            material.name, material.density_g_cm3
        )));
    }
    if !infill_percent.is_finite() {
        return Err(Error::InvalidOptions(format!(
            "infill percentage must be finite, got {}",
            infill_percent
        )));
    }
    let infill_percent = infill_percent.clamp(MIN_INFILL_PERCENT, MAX_INFILL_PERCENT);

    // The density floor keeps a minimum shell-equivalent mass even for
    // nearly hollow parts.
    let adjusted_density = (material.density_g_cm3 * params.min_density_fraction)
        .max(material.density_g_cm3 * infill_percent / 100.0);
    let weight_grams = metrics.volume_cm3 * adjusted_density;
    let material_cost = weight_grams * material.price_per_gram;

    // Three independent terms: deposition, per-layer head travel, and
    // perimeter/surface tracing.
    let modeled_time = params.grams_time_coeff * weight_grams
        + params.layer_time_coeff * f64::from(layer_count)
        + params.surface_time_coeff * metrics.surface_area_cm2;
    let estimated_time_hours = modeled_time.max(params.minimum_time_hours);

    let secondary_cost = if supports_enabled {
        params.support_rate_per_cm2 * metrics.surface_area_cm2
    } else {
        0.0
    };
    let machine_cost = estimated_time_hours * machine_rate;

    Ok(Quote {
        material_cost,
        secondary_cost,
        machine_cost,
        labor_cost: params.labor_cost,
        total: material_cost + secondary_cost + machine_cost + params.labor_cost,
        estimated_time_hours,
        layer_count,
        material_consumed: weight_grams,
    })
}

fn resin_quote(
    metrics: &GeometryMetrics,
    resin: &ResinOption,
    post_processing_enabled: bool,
    layer_count: u32,
    machine_rate: f64,
    params: &ProcessParameters,
) -> Quote {
    // 1 cm3 of cured model consumes roughly 1 mL of resin
    let milliliters = metrics.volume_cm3;
    let material_cost = milliliters * resin.price_per_ml;

    let seconds_per_layer = params.exposure_sec_per_layer + params.mechanical_overhead_sec;
    let estimated_time_hours = f64::from(layer_count) * seconds_per_layer / 3600.0;

    let secondary_cost = params.consumables_cost
        + if post_processing_enabled {
            params.post_process_rate
        } else {
            0.0
        };
    let machine_cost = estimated_time_hours * machine_rate;

    Quote {
        material_cost,
        secondary_cost,
        machine_cost,
        labor_cost: params.labor_cost,
        total: material_cost + secondary_cost + machine_cost + params.labor_cost,
        estimated_time_hours,
        layer_count,
        material_consumed: milliliters,
    }
}
