//! Demo catalog data for development and dashboard work.

use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::models::{CreateAssetRequest, CreatePlatformRequest};
use crate::store::CatalogStore;
use mediaquote_core::types::{AssetCategory, BuyType, DeviceSplit, Industry, Placement};

const SEED_ACTOR: &str = "seed";

pub fn seed_demo_data(store: &CatalogStore) {
    let platforms = vec![
        (
            "SnackDash",
            Industry::Qsr,
            json!({
                "demographic": {
                    "age_groups": ["18-24", "25-34"],
                    "genders": ["male", "female"],
                    "interests": ["food", "late-night", "offers"],
                },
                "geographic": {
                    "cities": ["Mumbai", "Delhi", "Bengaluru"],
                    "states": ["Maharashtra", "Karnataka"],
                    "tiers": ["tier1"],
                }
            }),
            "22,000,000",
            "3.5M",
            12.0,
            DeviceSplit { ios: 28.0, android: 66.0, web: 6.0 },
        ),
        (
            "CartHive",
            Industry::Ecommerce,
            json!({
                "demographic": {
                    "age_groups": ["25-34", "35-44"],
                    "genders": ["female"],
                    "interests": ["fashion", "electronics", "deals"],
                },
                "geographic": {
                    "cities": ["Mumbai", "Pune", "Hyderabad"],
                    "states": ["Maharashtra", "Telangana"],
                    "tiers": ["tier1", "tier2"],
                }
            }),
            "48M",
            "9,200,000",
            18.5,
            DeviceSplit { ios: 22.0, android: 64.0, web: 14.0 },
        ),
        (
            "SkyTrail",
            Industry::Travel,
            json!({
                "demographic": {
                    "age_groups": ["25-34", "35-44", "45-54"],
                    "interests": ["travel", "premium"],
                },
                "geographic": {
                    "cities": ["Delhi", "Bengaluru"],
                    "states": ["Delhi", "Karnataka"],
                    "tiers": ["tier1"],
                }
            }),
            "6.8M",
            "410k",
            31.0,
            DeviceSplit { ios: 46.0, android: 44.0, web: 10.0 },
        ),
        (
            "PayNest",
            Industry::Fintech,
            json!({
                "demographic": {
                    "age_groups": ["18-24", "25-34"],
                    "genders": ["male"],
                    "interests": ["investing", "upi", "credit"],
                },
                "geographic": {
                    "cities": ["Bengaluru", "Chennai"],
                    "states": ["Karnataka", "Tamil Nadu"],
                    "tiers": ["tier1", "tier2"],
                }
            }),
            "31,000,000",
            "5.1m",
            9.0,
            DeviceSplit { ios: 34.0, android: 62.0, web: 4.0 },
        ),
        (
            "RideLoop",
            Industry::Mobility,
            // deliberately sparse: no audience metadata recorded yet
            json!({}),
            "12M",
            "1.9M",
            6.0,
            DeviceSplit { ios: 30.0, android: 68.0, web: 2.0 },
        ),
    ];

    for (name, industry, audience, mau, dau, premium, split) in platforms {
        let platform = store.create_platform(
            CreatePlatformRequest {
                name: name.to_string(),
                industry,
                audience,
                mau: Some(mau.to_string()),
                dau: Some(dau.to_string()),
                premium_user_pct: Some(premium),
                device_split: split,
                logo_url: Some(format!(
                    "https://cdn.mediaquote.io/logos/{}.png",
                    name.to_lowercase()
                )),
            },
            SEED_ACTOR,
        );
        seed_assets(store, platform.id, name);
    }
}

fn seed_assets(store: &CatalogStore, platform_id: Uuid, platform_name: &str) {
    let assets = vec![
        (
            "Home Feed Banner",
            AssetCategory::Digital,
            "banner",
            Placement::HomeScreen,
            BuyType::Cpm,
            80_000.0,
            2_400.0,
            Some(1_800_000),
        ),
        (
            "Search Spotlight",
            AssetCategory::Digital,
            "sponsored listing",
            Placement::SearchResults,
            BuyType::Cpc,
            55_000.0,
            1_600.0,
            Some(950_000),
        ),
        (
            "Order Box Insert",
            AssetCategory::Physical,
            "package insert",
            Placement::PackageInsert,
            BuyType::Flat,
            120_000.0,
            4_000.0,
            None,
        ),
    ];

    for (name, category, asset_type, placement, buy_type, amount, base_cost, imps) in assets {
        let req = CreateAssetRequest {
            platform_id,
            name: format!("{} — {}", platform_name, name),
            category,
            asset_type: asset_type.to_string(),
            tags: vec![asset_type.replace(' ', "-")],
            placement,
            buy_type,
            amount,
            base_cost,
            estimated_clicks: imps.map(|i: u64| i / 180),
            estimated_impressions: imps,
            cost_per_day: None,
            file_url: None,
            thumbnail_url: None,
            file_size: None,
        };
        if let Err(e) = store.create_asset(req, SEED_ACTOR) {
            warn!(error = %e, platform = platform_name, "demo asset skipped");
        }
    }
}
