//! Injectable pricing strategies.
//!
//! Assets frequently arrive without `cost_per_day` or
//! `estimated_impressions`. A [`PricingModel`] supplies placeholder
//! figures for the gaps, standing in for a real pricing/forecast model;
//! author-entered values always win over the model's output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mediaquote_core::types::{Asset, BuyType};

/// Placeholder figures for one asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetPricing {
    pub cost_per_day: f64,
    pub estimated_impressions: u64,
}

/// Produces per-day cost and impression placeholders for assets that
/// carry neither.
pub trait PricingModel: Send + Sync {
    fn price(&self, asset: &Asset) -> AssetPricing;
}

// ─── Seeded placeholder pricing ─────────────────────────────────────────────

/// Range-based placeholder pricing. Each draw is keyed on
/// (seed, asset id), so the same catalog quotes identically across runs
/// and processes.
pub struct SeededPricing {
    seed: u64,
}

impl SeededPricing {
    pub const COST_PER_DAY_RANGE: (f64, f64) = (500.0, 5_000.0);
    pub const IMPRESSIONS_RANGE: (u64, u64) = (100_000, 1_100_000);

    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, asset: &Asset) -> StdRng {
        let id = asset.id.as_u128();
        let folded = (id as u64) ^ ((id >> 64) as u64);
        StdRng::seed_from_u64(self.seed ^ folded)
    }
}

impl PricingModel for SeededPricing {
    fn price(&self, asset: &Asset) -> AssetPricing {
        let mut rng = self.rng_for(asset);
        let (cost_lo, cost_hi) = Self::COST_PER_DAY_RANGE;
        let (imp_lo, imp_hi) = Self::IMPRESSIONS_RANGE;
        AssetPricing {
            cost_per_day: rng.gen_range(cost_lo..cost_hi),
            estimated_impressions: rng.gen_range(imp_lo..imp_hi),
        }
    }
}

// ─── Rate-card pricing ──────────────────────────────────────────────────────

/// Deterministic derivation from the asset's own commercial fields.
pub struct RateCardPricing {
    /// Monetary amount bought per thousand impressions.
    pub cpm_rate: f64,
    /// Impressions assumed behind each estimated click.
    pub impressions_per_click: u64,
    /// Reach assumed per unit of flat spend.
    pub flat_reach_factor: f64,
}

impl Default for RateCardPricing {
    fn default() -> Self {
        Self {
            cpm_rate: 250.0,
            impressions_per_click: 180,
            flat_reach_factor: 12.0,
        }
    }
}

impl PricingModel for RateCardPricing {
    fn price(&self, asset: &Asset) -> AssetPricing {
        let cost_per_day = if asset.base_cost > 0.0 {
            asset.base_cost
        } else {
            (asset.amount / 30.0).max(1.0)
        };
        let estimated_impressions = match asset.buy_type {
            BuyType::Cpm => ((asset.amount / self.cpm_rate.max(1.0)) * 1_000.0) as u64,
            BuyType::Cpc => asset
                .estimated_clicks
                .unwrap_or(0)
                .saturating_mul(self.impressions_per_click),
            BuyType::Flat => (asset.amount * self.flat_reach_factor) as u64,
        };
        AssetPricing {
            cost_per_day,
            estimated_impressions,
        }
    }
}

// ─── Fixed pricing ──────────────────────────────────────────────────────────

/// Returns the same figures for every asset. Intended for tests that need
/// exact arithmetic.
pub struct FixedPricing {
    pub cost_per_day: f64,
    pub estimated_impressions: u64,
}

impl PricingModel for FixedPricing {
    fn price(&self, _asset: &Asset) -> AssetPricing {
        AssetPricing {
            cost_per_day: self.cost_per_day,
            estimated_impressions: self.estimated_impressions,
        }
    }
}
