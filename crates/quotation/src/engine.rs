//! Quotation orchestrator.
//!
//! One engine run is a linear pass: fetch platforms and assets for the
//! requested platform set, narrow by category, resolve pricing, score,
//! apply explicit selection, allocate budget, and group the result by
//! platform. The engine owns no state between runs; given identical
//! inputs and identical catalog contents the output is identical.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use mediaquote_core::catalog::CatalogSource;
use mediaquote_core::types::{
    Asset, CampaignRequest, Platform, PlatformQuote, QuotationResult, QuotedAsset,
};
use mediaquote_core::QuoteResult;

use crate::allocation::{allocate, AllocationPolicy};
use crate::filter::{filter_by_category, filter_by_selection};
use crate::pricing::PricingModel;
use crate::scoring::score_assets;

pub struct QuotationEngine {
    source: Arc<dyn CatalogSource>,
    pricing: Arc<dyn PricingModel>,
    policy: AllocationPolicy,
}

impl QuotationEngine {
    pub fn new(source: Arc<dyn CatalogSource>, pricing: Arc<dyn PricingModel>) -> Self {
        Self {
            source,
            pricing,
            policy: AllocationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Generate a quotation for one campaign request.
    ///
    /// Unmet preconditions (no platform preferences, non-positive budget)
    /// are not errors: they resolve to the canonical empty result without
    /// touching the catalog. Store failures surface as
    /// [`mediaquote_core::QuoteError::Store`]; callers wanting the
    /// fail-soft empty-state contract use [`Self::generate_or_empty`].
    pub fn generate(&self, request: &CampaignRequest) -> QuoteResult<QuotationResult> {
        let campaign_days = request.duration.days();

        if request.platform_preferences.is_empty() || request.total_budget <= 0.0 {
            metrics::counter!("quotation.empty_requests").increment(1);
            debug!(
                budget = request.total_budget,
                platforms = request.platform_preferences.len(),
                "quotation preconditions unmet, returning empty result"
            );
            return Ok(QuotationResult::empty(campaign_days));
        }

        let platforms = self
            .source
            .platforms_by_ids(&request.platform_preferences)?;
        let assets = self
            .source
            .assets_by_platform_ids(&request.platform_preferences)?;

        let assets = filter_by_category(assets, &request.asset_categories);
        let mut candidates = self.resolve_pricing(assets);

        score_assets(&mut candidates, &platforms, request);

        if let Some(selection) = &request.asset_selection {
            candidates = filter_by_selection(candidates, selection);
        }

        allocate(
            &mut candidates,
            request.total_budget,
            campaign_days,
            self.policy,
        );

        let result = aggregate(
            &request.platform_preferences,
            platforms,
            candidates,
            campaign_days,
        );
        metrics::counter!("quotation.generated").increment(1);
        Ok(result)
    }

    /// Fail-soft variant for callers that render an empty state instead
    /// of an error screen: any engine error is logged and collapsed into
    /// the canonical empty result.
    pub fn generate_or_empty(&self, request: &CampaignRequest) -> QuotationResult {
        match self.generate(request) {
            Ok(result) => result,
            Err(e) => {
                metrics::counter!("quotation.failed").increment(1);
                error!(error = %e, "quotation failed, returning empty result");
                QuotationResult::empty(request.duration.days())
            }
        }
    }

    /// Author-entered figures always win; the pricing model only fills
    /// the gaps.
    fn resolve_pricing(&self, assets: Vec<Asset>) -> Vec<QuotedAsset> {
        assets
            .into_iter()
            .map(|asset| {
                let placeholder = self.pricing.price(&asset);
                let cost_per_day = asset.cost_per_day.unwrap_or(placeholder.cost_per_day);
                let estimated_impressions = asset
                    .estimated_impressions
                    .unwrap_or(placeholder.estimated_impressions);
                QuotedAsset {
                    asset,
                    cost_per_day,
                    estimated_impressions,
                    targeting_score: 0.0,
                    allocated_budget: 0.0,
                }
            })
            .collect()
    }
}

/// Group allocated assets by owning platform, in the preference order of
/// the request. Assets referencing a platform missing from the fetched
/// list (deleted between the two reads) are dropped and counted.
fn aggregate(
    preference_order: &[Uuid],
    platforms: Vec<Platform>,
    candidates: Vec<QuotedAsset>,
    campaign_days: u32,
) -> QuotationResult {
    let mut ordered: Vec<Platform> = preference_order
        .iter()
        .filter_map(|id| platforms.iter().find(|p| p.id == *id).cloned())
        .collect();
    // platforms returned by the store but absent from the preference
    // list keep their fetch order at the tail
    for p in platforms {
        if !ordered.iter().any(|o| o.id == p.id) {
            ordered.push(p);
        }
    }

    let mut orphaned = 0_u64;
    let mut quotes: Vec<PlatformQuote> = ordered
        .into_iter()
        .map(|platform| PlatformQuote {
            platform,
            assets: Vec::new(),
            total_cost: 0.0,
            total_impressions: 0,
        })
        .collect();

    for candidate in candidates {
        match quotes
            .iter_mut()
            .find(|q| q.platform.id == candidate.asset.platform_id)
        {
            Some(quote) => {
                quote.total_cost += candidate.allocated_budget;
                quote.total_impressions += candidate.estimated_impressions;
                quote.assets.push(candidate);
            }
            None => orphaned += 1,
        }
    }
    if orphaned > 0 {
        metrics::counter!("quotation.orphan_assets_dropped").increment(orphaned);
        warn!(count = orphaned, "dropped assets without a fetched platform");
    }

    let total_cost = quotes.iter().map(|q| q.total_cost).sum();
    let total_impressions = quotes.iter().map(|q| q.total_impressions).sum();

    QuotationResult {
        platforms: quotes,
        total_cost,
        total_impressions,
        campaign_days,
    }
}
