//! Preliminary cost estimate for quote requests.

use crate::models::RoomDimensions;
use serde::Serialize;

/// Installed price per square foot of floor area, in HTG.
pub const BASE_PRICE_PER_SQFT: f64 = 450.0;

/// Price multipliers for the add-ons offered on the quote form.
pub const FEATURE_MULTIPLIERS: &[(&str, f64)] = &[
    ("soft-close-hinges", 1.10),
    ("pull-out-drawers", 1.15),
    ("lazy-susan", 1.05),
    ("crown-molding", 1.08),
    ("under-cabinet-lighting", 1.12),
    ("glass-doors", 1.10),
    ("wine-rack", 1.05),
    ("spice-rack", 1.03),
];

/// Pricing parameters used by [`estimate`].
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    pub base_price_per_sqft: f64,
    pub feature_multipliers: Vec<(String, f64)>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::with_base_price(BASE_PRICE_PER_SQFT)
    }
}

impl PricingTable {
    /// Default multipliers with a different base price.
    pub fn with_base_price(base_price_per_sqft: f64) -> Self {
        Self {
            base_price_per_sqft,
            feature_multipliers: FEATURE_MULTIPLIERS
                .iter()
                .map(|(slug, m)| (slug.to_string(), *m))
                .collect(),
        }
    }

    /// Multiplier for one add-on; unknown add-ons are priced at 1.
    pub fn multiplier_for(&self, feature: &str) -> f64 {
        self.feature_multipliers
            .iter()
            .find(|(slug, _)| slug == feature)
            .map(|(_, m)| *m)
            .unwrap_or(1.0)
    }

    /// Product of the multipliers of every selected add-on.
    pub fn feature_multiplier<S: AsRef<str>>(&self, features: &[S]) -> f64 {
        features
            .iter()
            .fold(1.0, |acc, f| acc * self.multiplier_for(f.as_ref()))
    }
}

/// Derived figures for one quote request. Never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Floor area in sq ft.
    pub area: f64,
    /// Room volume in cubic ft.
    pub volume: f64,
    pub base_cost: f64,
    pub feature_multiplier: f64,
    /// Rounded to the nearest HTG.
    pub estimated_cost: i64,
}

impl CostEstimate {
    /// Estimated cost spread over the floor area, or `None` without an area.
    pub fn price_per_sqft(&self) -> Option<f64> {
        (self.area > 0.0).then(|| self.estimated_cost as f64 / self.area)
    }

    /// False when the unrounded cost is not finite or too large for a whole
    /// HTG amount; `estimated_cost` is then meaningless.
    pub fn within_range(&self) -> bool {
        let raw = self.base_cost * self.feature_multiplier;
        [self.area, self.volume, raw]
            .iter()
            .all(|v| v.is_finite() && v.abs() < i64::MAX as f64)
    }
}

/// Compute the preliminary estimate.
///
/// Without dimensions every figure is zero, whatever features were picked.
pub fn estimate<S: AsRef<str>>(
    dimensions: Option<&RoomDimensions>,
    features: &[S],
    pricing: &PricingTable,
) -> CostEstimate {
    let Some(dims) = dimensions else {
        return CostEstimate {
            area: 0.0,
            volume: 0.0,
            base_cost: 0.0,
            feature_multiplier: pricing.feature_multiplier(features),
            estimated_cost: 0,
        };
    };

    let area = dims.length * dims.width;
    let volume = area * dims.height;
    let base_cost = area * pricing.base_price_per_sqft;
    let feature_multiplier = pricing.feature_multiplier(features);

    CostEstimate {
        area,
        volume,
        base_cost,
        feature_multiplier,
        estimated_cost: (base_cost * feature_multiplier).round() as i64,
    }
}
