//! Five-year cost comparison between PVC and wood cabinets.
//!
//! PVC carries a flat 2% yearly upkeep. Wood carries humidity-adjusted
//! maintenance every year plus, from year 3, a replacement cost weighted by
//! a linearly increasing probability.

use serde::{Deserialize, Serialize};

/// Number of years covered by a projection.
pub const PROJECTION_YEARS: u32 = 5;

/// Yearly PVC upkeep as a fraction of its installed cost.
const PVC_UPKEEP_RATE: f64 = 0.02;

/// Largest total that still rounds into an `i64`.
const MAX_AMOUNT: f64 = i64::MAX as f64;

/// Inputs of the calculator. Prices are HTG per sq ft, percentages are 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionParams {
    pub kitchen_size: f64,
    pub pvc_price_per_sq_ft: f64,
    pub wood_price_per_sq_ft: f64,
    pub wood_maintenance_percent: f64,
    pub humidity_multiplier: f64,
    pub wood_replacement_risk: f64,
}

impl Default for ProjectionParams {
    /// Calculator defaults for a typical Haitian kitchen.
    fn default() -> Self {
        Self {
            kitchen_size: 120.0,
            pvc_price_per_sq_ft: 450.0,
            wood_price_per_sq_ft: 350.0,
            wood_maintenance_percent: 8.0,
            humidity_multiplier: 1.5,
            wood_replacement_risk: 25.0,
        }
    }
}

impl ProjectionParams {
    /// Name of the first input that is negative or not a finite number.
    pub fn invalid_input(&self) -> Option<&'static str> {
        [
            ("kitchenSize", self.kitchen_size),
            ("pvcPricePerSqFt", self.pvc_price_per_sq_ft),
            ("woodPricePerSqFt", self.wood_price_per_sq_ft),
            ("woodMaintenancePercent", self.wood_maintenance_percent),
            ("humidityMultiplier", self.humidity_multiplier),
            ("woodReplacementRisk", self.wood_replacement_risk),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
        .map(|(name, _)| name)
        .or_else(|| (!self.totals_fit()).then_some("kitchenSize"))
    }

    /// Whether the unrounded year-5 totals fit a whole-HTG amount.
    fn totals_fit(&self) -> bool {
        let base_pvc = self.kitchen_size * self.pvc_price_per_sq_ft;
        let base_wood = self.kitchen_size * self.wood_price_per_sq_ft;
        let maintenance =
            base_wood * (self.wood_maintenance_percent / 100.0) * self.humidity_multiplier;
        // Replacement weights for years 3..=5 sum to 1 + 2 + 3.
        let replacement = base_wood * self.wood_replacement_risk / 100.0 * 6.0 * 0.5;

        let pvc_total = base_pvc * (1.0 + PVC_UPKEEP_RATE * f64::from(PROJECTION_YEARS));
        let wood_total = base_wood + maintenance * f64::from(PROJECTION_YEARS) + replacement;

        [base_pvc, base_wood, pvc_total, wood_total]
            .iter()
            .all(|v| v.is_finite() && *v < MAX_AMOUNT)
    }
}

/// Cumulative cost of each material at the end of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCostProjection {
    pub year: u32,
    pub pvc_cost: i64,
    pub wood_cost: i64,
}

/// Project cumulative costs for years 1 through 5.
///
/// Running totals are kept unrounded; each emitted entry is rounded to the
/// nearest whole HTG.
pub fn project_costs(params: &ProjectionParams) -> Vec<YearlyCostProjection> {
    let base_pvc = params.kitchen_size * params.pvc_price_per_sq_ft;
    let base_wood = params.kitchen_size * params.wood_price_per_sq_ft;
    let wood_maintenance =
        base_wood * (params.wood_maintenance_percent / 100.0) * params.humidity_multiplier;

    let mut pvc = base_pvc;
    let mut wood = base_wood;

    (1..=PROJECTION_YEARS)
        .map(|year| {
            pvc += base_pvc * PVC_UPKEEP_RATE;
            wood += wood_maintenance;

            if year >= 3 {
                let replacement_probability =
                    params.wood_replacement_risk / 100.0 * f64::from(year - 2) * 0.5;
                wood += base_wood * replacement_probability;
            }

            YearlyCostProjection {
                year,
                pvc_cost: pvc.round() as i64,
                wood_cost: wood.round() as i64,
            }
        })
        .collect()
}

/// Year-5 totals of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub pvc_total: i64,
    pub wood_total: i64,
    /// Wood total minus PVC total; negative when wood comes out cheaper.
    pub total_savings: i64,
}

pub fn summarize(years: &[YearlyCostProjection]) -> ProjectionSummary {
    let (pvc_total, wood_total) = years
        .last()
        .map(|y| (y.pvc_cost, y.wood_cost))
        .unwrap_or((0, 0));

    ProjectionSummary {
        pvc_total,
        wood_total,
        total_savings: wood_total - pvc_total,
    }
}
