//! Candidate-narrowing stages: category filter and explicit selection.

use std::collections::HashMap;
use uuid::Uuid;

use mediaquote_core::types::{Asset, AssetCategory, QuotedAsset};

/// Keep assets whose category is in `allowed`. An empty allowed set means
/// "no filter requested" and returns the input unchanged — same elements,
/// same order.
pub fn filter_by_category(assets: Vec<Asset>, allowed: &[AssetCategory]) -> Vec<Asset> {
    if allowed.is_empty() {
        return assets;
    }
    assets
        .into_iter()
        .filter(|a| allowed.contains(&a.category))
        .collect()
}

/// Apply an explicit per-platform asset selection. Platforms without an
/// entry keep all their candidates; platforms with an entry keep only the
/// assets it names.
pub fn filter_by_selection(
    assets: Vec<QuotedAsset>,
    selection: &HashMap<Uuid, Vec<Uuid>>,
) -> Vec<QuotedAsset> {
    assets
        .into_iter()
        .filter(|qa| match selection.get(&qa.asset.platform_id) {
            Some(picked) => picked.contains(&qa.asset.id),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mediaquote_core::types::{BuyType, Placement};

    fn asset(category: AssetCategory) -> Asset {
        let now = Utc::now();
        Asset {
            id: Uuid::new_v4(),
            platform_id: Uuid::new_v4(),
            name: "A".to_string(),
            category,
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
        }
    }

    fn quoted(asset: Asset) -> QuotedAsset {
        QuotedAsset {
            asset,
            cost_per_day: 100.0,
            estimated_impressions: 1_000,
            targeting_score: 1.0,
            allocated_budget: 0.0,
        }
    }

    #[test]
    fn test_empty_allowed_set_is_identity() {
        let assets = vec![
            asset(AssetCategory::Digital),
            asset(AssetCategory::Physical),
            asset(AssetCategory::Phygital),
        ];
        let ids: Vec<Uuid> = assets.iter().map(|a| a.id).collect();

        let filtered = filter_by_category(assets, &[]);
        let filtered_ids: Vec<Uuid> = filtered.iter().map(|a| a.id).collect();
        assert_eq!(filtered_ids, ids);
    }

    #[test]
    fn test_category_filter_narrows() {
        let assets = vec![
            asset(AssetCategory::Digital),
            asset(AssetCategory::Physical),
            asset(AssetCategory::Digital),
        ];
        let filtered = filter_by_category(assets, &[AssetCategory::Digital]);
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|a| a.category == AssetCategory::Digital));
    }

    #[test]
    fn test_selection_filter_keeps_unlisted_platforms() {
        let picked = quoted(asset(AssetCategory::Digital));
        let dropped = {
            let mut a = asset(AssetCategory::Digital);
            a.platform_id = picked.asset.platform_id;
            quoted(a)
        };
        let untouched = quoted(asset(AssetCategory::Physical));

        let mut selection = HashMap::new();
        selection.insert(picked.asset.platform_id, vec![picked.asset.id]);

        let kept = filter_by_selection(vec![picked.clone(), dropped, untouched.clone()], &selection);
        let kept_ids: Vec<Uuid> = kept.iter().map(|qa| qa.asset.id).collect();
        assert_eq!(kept_ids, vec![picked.asset.id, untouched.asset.id]);
    }
}
