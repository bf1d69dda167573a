//! Catalog overview aggregates for the dashboard.

use serde::Serialize;
use std::collections::HashMap;

use mediaquote_core::types::{Asset, AssetCategory, DeviceSplit, Placement, Platform};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogOverview {
    pub total_platforms: u64,
    pub total_assets: u64,
    /// (category, asset count), sorted by category name.
    pub assets_by_category: Vec<(String, u64)>,
    /// (placement, asset count), sorted by placement name.
    pub assets_by_placement: Vec<(String, u64)>,
    /// Sum of reported monthly active users across platforms.
    pub total_monthly_reach: u64,
    /// Mean premium-user percentage over platforms that report one.
    pub avg_premium_user_pct: f64,
    pub avg_device_split: DeviceSplit,
    /// (platform name, asset count), largest first, top five.
    pub top_platforms_by_assets: Vec<(String, u64)>,
}

/// Compute dashboard aggregates from catalog snapshots.
pub fn catalog_overview(platforms: &[Platform], assets: &[Asset]) -> CatalogOverview {
    let mut by_category: HashMap<String, u64> = HashMap::new();
    let mut by_placement: HashMap<String, u64> = HashMap::new();
    let mut by_platform: HashMap<uuid::Uuid, u64> = HashMap::new();
    for asset in assets {
        *by_category
            .entry(category_label(asset.category).to_string())
            .or_insert(0) += 1;
        *by_placement
            .entry(placement_label(asset.placement).to_string())
            .or_insert(0) += 1;
        *by_platform.entry(asset.platform_id).or_insert(0) += 1;
    }

    let mut assets_by_category: Vec<(String, u64)> = by_category.into_iter().collect();
    assets_by_category.sort_by(|a, b| a.0.cmp(&b.0));
    let mut assets_by_placement: Vec<(String, u64)> = by_placement.into_iter().collect();
    assets_by_placement.sort_by(|a, b| a.0.cmp(&b.0));

    let total_monthly_reach = platforms.iter().filter_map(|p| p.mau).sum();

    let premium: Vec<f64> = platforms.iter().filter_map(|p| p.premium_user_pct).collect();
    let avg_premium_user_pct = if premium.is_empty() {
        0.0
    } else {
        premium.iter().sum::<f64>() / premium.len() as f64
    };

    let avg_device_split = if platforms.is_empty() {
        DeviceSplit::default()
    } else {
        let n = platforms.len() as f64;
        DeviceSplit {
            ios: platforms.iter().map(|p| p.device_split.ios).sum::<f64>() / n,
            android: platforms.iter().map(|p| p.device_split.android).sum::<f64>() / n,
            web: platforms.iter().map(|p| p.device_split.web).sum::<f64>() / n,
        }
    };

    let mut top_platforms_by_assets: Vec<(String, u64)> = platforms
        .iter()
        .map(|p| (p.name.clone(), by_platform.get(&p.id).copied().unwrap_or(0)))
        .collect();
    top_platforms_by_assets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_platforms_by_assets.truncate(5);

    CatalogOverview {
        total_platforms: platforms.len() as u64,
        total_assets: assets.len() as u64,
        assets_by_category,
        assets_by_placement,
        total_monthly_reach,
        avg_premium_user_pct,
        avg_device_split,
        top_platforms_by_assets,
    }
}

fn category_label(category: AssetCategory) -> &'static str {
    match category {
        AssetCategory::Digital => "digital",
        AssetCategory::Physical => "physical",
        AssetCategory::Phygital => "phygital",
    }
}

fn placement_label(placement: Placement) -> &'static str {
    match placement {
        Placement::HomeScreen => "home_screen",
        Placement::SearchResults => "search_results",
        Placement::Checkout => "checkout",
        Placement::OrderTracking => "order_tracking",
        Placement::InStore => "in_store",
        Placement::PackageInsert => "package_insert",
        Placement::RideScreen => "ride_screen",
        Placement::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mediaquote_core::types::{AudienceData, BuyType, Industry};
    use uuid::Uuid;

    fn platform(name: &str, mau: Option<u64>, premium: Option<f64>) -> Platform {
        let now = Utc::now();
        Platform {
            id: Uuid::new_v4(),
            name: name.to_string(),
            industry: Industry::Ecommerce,
            audience: AudienceData::default(),
            mau,
            dau: None,
            premium_user_pct: premium,
            device_split: DeviceSplit {
                ios: 30.0,
                android: 60.0,
                web: 10.0,
            },
            logo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn asset(platform_id: Uuid, category: AssetCategory, placement: Placement) -> Asset {
        let now = Utc::now();
        Asset {
            id: Uuid::new_v4(),
            platform_id,
            name: "A".to_string(),
            category,
            asset_type: "banner".to_string(),
            tags: Vec::new(),
            placement,
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

    #[test]
    fn test_overview_counts_and_breakdowns() {
        let p1 = platform("CartHive", Some(48_000_000), Some(18.0));
        let p2 = platform("SnackDash", Some(22_000_000), None);
        let assets = vec![
            asset(p1.id, AssetCategory::Digital, Placement::HomeScreen),
            asset(p1.id, AssetCategory::Digital, Placement::Checkout),
            asset(p2.id, AssetCategory::Physical, Placement::PackageInsert),
        ];

        let overview = catalog_overview(&[p1, p2], &assets);
        assert_eq!(overview.total_platforms, 2);
        assert_eq!(overview.total_assets, 3);
        assert_eq!(
            overview.assets_by_category,
            vec![("digital".to_string(), 2), ("physical".to_string(), 1)]
        );
        assert_eq!(overview.total_monthly_reach, 70_000_000);
        assert!((overview.avg_premium_user_pct - 18.0).abs() < f64::EPSILON);
        assert_eq!(overview.top_platforms_by_assets[0].0, "CartHive");
        assert_eq!(overview.top_platforms_by_assets[0].1, 2);
    }

    #[test]
    fn test_overview_on_empty_catalog() {
        let overview = catalog_overview(&[], &[]);
        assert_eq!(overview.total_platforms, 0);
        assert_eq!(overview.total_assets, 0);
        assert!(overview.assets_by_category.is_empty());
        assert_eq!(overview.avg_premium_user_pct, 0.0);
        assert_eq!(overview.avg_device_split.ios, 0.0);
    }
}
