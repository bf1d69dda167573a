//! Budget allocator — divides a campaign budget across scored assets.
//!
//! Each asset's share is proportional to its targeting score and capped at
//! the most it could plausibly absorb (`cost_per_day × campaign_days`).
//! Under [`AllocationPolicy::Proportional`] budget capped off an asset is
//! left unspent, so the total allocated can fall short of the requested
//! budget; under [`AllocationPolicy::WaterFill`] the capped surplus is
//! redistributed across uncapped assets until stable.

use serde::{Deserialize, Serialize};

use mediaquote_core::types::QuotedAsset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Single proportional pass, no redistribution of capped surplus.
    #[default]
    Proportional,
    /// Iterative redistribution of capped surplus across uncapped assets.
    WaterFill,
}

/// Annotate each candidate with its allocated budget.
///
/// Candidates are first ordered by targeting score descending, asset id
/// ascending — the explicit secondary key keeps allocation order
/// deterministic across runs.
pub fn allocate(
    candidates: &mut [QuotedAsset],
    total_budget: f64,
    campaign_days: u32,
    policy: AllocationPolicy,
) {
    candidates.sort_by(|a, b| {
        b.targeting_score
            .partial_cmp(&a.targeting_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.asset.id.cmp(&b.asset.id))
    });

    let budget = total_budget.max(0.0);
    if candidates.is_empty() || budget == 0.0 {
        for qa in candidates.iter_mut() {
            qa.allocated_budget = 0.0;
        }
        return;
    }

    match policy {
        AllocationPolicy::Proportional => proportional(candidates, budget, campaign_days),
        AllocationPolicy::WaterFill => water_fill(candidates, budget, campaign_days),
    }
}

/// A score that is missing or degenerate is treated as the base 1.0 so a
/// single bad record cannot zero out the divisor.
fn effective_score(qa: &QuotedAsset) -> f64 {
    if qa.targeting_score.is_finite() && qa.targeting_score > 0.0 {
        qa.targeting_score
    } else {
        1.0
    }
}

fn ceiling(qa: &QuotedAsset, campaign_days: u32) -> f64 {
    (qa.cost_per_day * campaign_days as f64).max(0.0)
}

fn proportional(candidates: &mut [QuotedAsset], budget: f64, campaign_days: u32) {
    let total_score: f64 = candidates.iter().map(effective_score).sum();
    for qa in candidates.iter_mut() {
        let share = effective_score(qa) / total_score * budget;
        qa.allocated_budget = share.min(ceiling(qa, campaign_days)).max(0.0);
    }
}

fn water_fill(candidates: &mut [QuotedAsset], budget: f64, campaign_days: u32) {
    let n = candidates.len();
    let scores: Vec<f64> = candidates.iter().map(effective_score).collect();
    let ceilings: Vec<f64> = candidates.iter().map(|qa| ceiling(qa, campaign_days)).collect();

    let mut alloc = vec![0.0_f64; n];
    let mut frozen = vec![false; n];

    loop {
        let frozen_total: f64 = (0..n).filter(|i| frozen[*i]).map(|i| alloc[i]).sum();
        let remaining = (budget - frozen_total).max(0.0);
        let active_score: f64 = (0..n).filter(|i| !frozen[*i]).map(|i| scores[i]).sum();
        if active_score <= 0.0 || remaining <= f64::EPSILON {
            break;
        }

        let mut froze_any = false;
        for i in 0..n {
            if frozen[i] {
                continue;
            }
            let share = scores[i] / active_score * remaining;
            if share >= ceilings[i] {
                alloc[i] = ceilings[i];
                frozen[i] = true;
                froze_any = true;
            }
        }
        if froze_any {
            continue;
        }

        // stable: no asset hits its ceiling at the current water level
        for i in 0..n {
            if !frozen[i] {
                alloc[i] = scores[i] / active_score * remaining;
            }
        }
        break;
    }

    for (qa, amount) in candidates.iter_mut().zip(alloc) {
        qa.allocated_budget = amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mediaquote_core::types::{Asset, AssetCategory, BuyType, Placement};
    use uuid::Uuid;

    fn candidate(score: f64, cost_per_day: f64) -> QuotedAsset {
        let now = Utc::now();
        QuotedAsset {
            asset: Asset {
                id: Uuid::new_v4(),
                platform_id: Uuid::new_v4(),
                name: "A".to_string(),
                category: AssetCategory::Digital,
                asset_type: "banner".to_string(),
                tags: Vec::new(),
                placement: Placement::HomeScreen,
                buy_type: BuyType::Cpm,
                amount: 0.0,
                base_cost: 0.0,
                estimated_clicks: None,
                estimated_impressions: None,
                cost_per_day: None,
                file_url: None,
                thumbnail_url: None,
                file_size: None,
                created_at: now,
                updated_at: now,
            },
            cost_per_day,
            estimated_impressions: 0,
            targeting_score: score,
            allocated_budget: 0.0,
        }
    }

    #[test]
    fn test_single_asset_takes_whole_budget_up_to_ceiling() {
        let mut assets = vec![candidate(1.2, 1_000.0)];
        allocate(&mut assets, 500.0, 2, AllocationPolicy::Proportional);
        assert!((assets[0].allocated_budget - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_proportional_split_follows_scores() {
        let mut assets = vec![candidate(1.2, 10_000.0), candidate(1.0, 10_000.0)];
        allocate(&mut assets, 220.0, 1, AllocationPolicy::Proportional);

        // sorted: higher score first
        assert!((assets[0].targeting_score - 1.2).abs() < 1e-12);
        assert!((assets[0].allocated_budget - 120.0).abs() < 1e-6);
        assert!((assets[1].allocated_budget - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_cap_loses_budget_under_proportional() {
        // ceiling = 10 * 1 = 10, budget = 100: the other 90 is not
        // redistributed under the proportional policy
        let mut assets = vec![candidate(1.0, 10.0)];
        allocate(&mut assets, 100.0, 1, AllocationPolicy::Proportional);
        assert!((assets[0].allocated_budget - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_fill_redistributes_capped_surplus() {
        let mut assets = vec![candidate(1.0, 10.0), candidate(1.0, 1_000.0)];
        allocate(&mut assets, 100.0, 1, AllocationPolicy::WaterFill);

        let capped = assets
            .iter()
            .find(|qa| (qa.allocated_budget - 10.0).abs() < 1e-9)
            .expect("capped asset");
        let open = assets
            .iter()
            .find(|qa| qa.asset.id != capped.asset.id)
            .expect("open asset");
        assert!((open.allocated_budget - 90.0).abs() < 1e-9);

        let total: f64 = assets.iter().map(|qa| qa.allocated_budget).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_fill_leaves_surplus_when_everything_caps() {
        let mut assets = vec![candidate(1.0, 10.0), candidate(1.5, 20.0)];
        allocate(&mut assets, 1_000.0, 1, AllocationPolicy::WaterFill);

        let total: f64 = assets.iter().map(|qa| qa.allocated_budget).sum();
        assert!((total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_bounds_hold() {
        let mut assets = vec![
            candidate(1.8, 50.0),
            candidate(1.4, 500.0),
            candidate(1.0, 5.0),
        ];
        let days = 3;
        allocate(&mut assets, 2_000.0, days, AllocationPolicy::Proportional);
        for qa in &assets {
            assert!(qa.allocated_budget >= 0.0);
            assert!(qa.allocated_budget <= qa.cost_per_day * days as f64 + 1e-9);
        }
    }

    #[test]
    fn test_degenerate_score_treated_as_base() {
        let mut assets = vec![candidate(f64::NAN, 10_000.0), candidate(1.0, 10_000.0)];
        allocate(&mut assets, 200.0, 1, AllocationPolicy::Proportional);
        let total: f64 = assets.iter().map(|qa| qa.allocated_budget).sum();
        assert!((total - 200.0).abs() < 1e-6);
        // both effectively score 1.0 and split evenly
        for qa in &assets {
            assert!((qa.allocated_budget - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tie_break_orders_by_asset_id() {
        let mut assets = vec![candidate(1.0, 100.0), candidate(1.0, 100.0)];
        let mut expected: Vec<Uuid> = assets.iter().map(|qa| qa.asset.id).collect();
        expected.sort();

        allocate(&mut assets, 100.0, 1, AllocationPolicy::Proportional);
        let ordered: Vec<Uuid> = assets.iter().map(|qa| qa.asset.id).collect();
        assert_eq!(ordered, expected);
    }

    #[test]
    fn test_zero_budget_allocates_zero() {
        let mut assets = vec![candidate(1.6, 100.0)];
        allocate(&mut assets, 0.0, 5, AllocationPolicy::Proportional);
        assert_eq!(assets[0].allocated_budget, 0.0);
    }
}
