//! In-memory catalog store backed by DashMap.
//!
//! Production: replace with the managed relational store (sqlx or
//! similar). This provides the same API surface for development and
//! testing, including the read-side `CatalogSource` seam the quotation
//! engine consumes.

use crate::models::*;
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use mediaquote_core::catalog::CatalogSource;
use mediaquote_core::normalize;
use mediaquote_core::types::{Asset, AudienceData, Platform};
use mediaquote_core::{QuoteError, QuoteResult};

/// Thread-safe in-memory store for platforms, assets, and the audit log.
pub struct CatalogStore {
    platforms: DashMap<Uuid, Platform>,
    assets: DashMap<Uuid, Asset>,
    audit_log: DashMap<Uuid, CatalogAuditEntry>,
}

impl CatalogStore {
    pub fn new() -> Self {
        info!("Catalog store initialized (in-memory, development mode)");
        Self {
            platforms: DashMap::new(),
            assets: DashMap::new(),
            audit_log: DashMap::new(),
        }
    }

    /// A store pre-populated with representative demo data.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        crate::seed::seed_demo_data(&store);
        store
    }

    // ─── Platforms ─────────────────────────────────────────────────────────

    pub fn list_platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> =
            self.platforms.iter().map(|r| r.value().clone()).collect();
        platforms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        platforms
    }

    pub fn get_platform(&self, id: Uuid) -> Option<Platform> {
        self.platforms.get(&id).map(|r| r.value().clone())
    }

    pub fn create_platform(&self, req: CreatePlatformRequest, actor: &str) -> Platform {
        let now = Utc::now();
        let platform = Platform {
            id: Uuid::new_v4(),
            name: req.name,
            industry: req.industry,
            audience: AudienceData::from_json(&req.audience),
            mau: req.mau.as_deref().and_then(normalize::parse_count),
            dau: req.dau.as_deref().and_then(normalize::parse_count),
            premium_user_pct: req.premium_user_pct.map(|p| p.clamp(0.0, 100.0)),
            device_split: req.device_split.clamped(),
            logo_url: req.logo_url,
            created_at: now,
            updated_at: now,
        };
        let id = platform.id;
        self.platforms.insert(id, platform.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "platform",
            &id.to_string(),
            serde_json::json!({"name": &platform.name}),
        );
        platform
    }

    pub fn update_platform(
        &self,
        id: Uuid,
        req: UpdatePlatformRequest,
        actor: &str,
    ) -> Option<Platform> {
        self.platforms.get_mut(&id).map(|mut entry| {
            let p = entry.value_mut();
            if let Some(name) = req.name {
                p.name = name;
            }
            if let Some(industry) = req.industry {
                p.industry = industry;
            }
            if let Some(audience) = req.audience {
                p.audience = AudienceData::from_json(&audience);
            }
            if let Some(mau) = req.mau {
                p.mau = normalize::parse_count(&mau);
            }
            if let Some(dau) = req.dau {
                p.dau = normalize::parse_count(&dau);
            }
            if let Some(pct) = req.premium_user_pct {
                p.premium_user_pct = Some(pct.clamp(0.0, 100.0));
            }
            if let Some(split) = req.device_split {
                p.device_split = split.clamped();
            }
            if let Some(url) = req.logo_url {
                p.logo_url = Some(url);
            }
            p.updated_at = Utc::now();
            self.log_audit(
                actor,
                AuditAction::Update,
                "platform",
                &id.to_string(),
                serde_json::json!({}),
            );
            p.clone()
        })
    }

    /// Delete a platform. Rejected while any asset still references it;
    /// callers remove the assets first (no cascading delete).
    pub fn delete_platform(&self, id: Uuid, actor: &str) -> QuoteResult<()> {
        if !self.platforms.contains_key(&id) {
            return Err(QuoteError::PlatformNotFound(id));
        }
        let asset_count = self
            .assets
            .iter()
            .filter(|r| r.value().platform_id == id)
            .count();
        if asset_count > 0 {
            return Err(QuoteError::PlatformInUse {
                platform_id: id,
                asset_count,
            });
        }
        self.platforms.remove(&id);
        self.log_audit(
            actor,
            AuditAction::Delete,
            "platform",
            &id.to_string(),
            serde_json::json!({}),
        );
        Ok(())
    }

    // ─── Assets ────────────────────────────────────────────────────────────

    pub fn list_assets(&self) -> Vec<Asset> {
        let mut assets: Vec<Asset> = self.assets.iter().map(|r| r.value().clone()).collect();
        assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        assets
    }

    pub fn assets_for_platform(&self, platform_id: Uuid) -> Vec<Asset> {
        let mut assets: Vec<Asset> = self
            .assets
            .iter()
            .filter(|r| r.value().platform_id == platform_id)
            .map(|r| r.value().clone())
            .collect();
        assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        assets
    }

    pub fn get_asset(&self, id: Uuid) -> Option<Asset> {
        self.assets.get(&id).map(|r| r.value().clone())
    }

    pub fn create_asset(&self, req: CreateAssetRequest, actor: &str) -> QuoteResult<Asset> {
        if !self.platforms.contains_key(&req.platform_id) {
            return Err(QuoteError::PlatformNotFound(req.platform_id));
        }
        let now = Utc::now();
        let asset = Asset {
            id: Uuid::new_v4(),
            platform_id: req.platform_id,
            name: req.name,
            category: req.category,
            asset_type: req.asset_type,
            tags: req.tags,
            placement: req.placement,
            buy_type: req.buy_type,
            amount: req.amount.max(0.0),
            base_cost: req.base_cost.max(0.0),
            estimated_clicks: req.estimated_clicks,
            estimated_impressions: req.estimated_impressions,
            cost_per_day: req.cost_per_day.filter(|c| *c > 0.0),
            file_url: req.file_url,
            thumbnail_url: req.thumbnail_url,
            file_size: req.file_size,
            created_at: now,
            updated_at: now,
        };
        let id = asset.id;
        self.assets.insert(id, asset.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "asset",
            &id.to_string(),
            serde_json::json!({"name": &asset.name, "platform_id": asset.platform_id}),
        );
        Ok(asset)
    }

    pub fn update_asset(&self, id: Uuid, req: UpdateAssetRequest, actor: &str) -> Option<Asset> {
        self.assets.get_mut(&id).map(|mut entry| {
            let a = entry.value_mut();
            if let Some(name) = req.name {
                a.name = name;
            }
            if let Some(category) = req.category {
                a.category = category;
            }
            if let Some(asset_type) = req.asset_type {
                a.asset_type = asset_type;
            }
            if let Some(tags) = req.tags {
                a.tags = tags;
            }
            if let Some(placement) = req.placement {
                a.placement = placement;
            }
            if let Some(buy_type) = req.buy_type {
                a.buy_type = buy_type;
            }
            if let Some(amount) = req.amount {
                a.amount = amount.max(0.0);
            }
            if let Some(base_cost) = req.base_cost {
                a.base_cost = base_cost.max(0.0);
            }
            if let Some(clicks) = req.estimated_clicks {
                a.estimated_clicks = Some(clicks);
            }
            if let Some(imps) = req.estimated_impressions {
                a.estimated_impressions = Some(imps);
            }
            if let Some(cpd) = req.cost_per_day {
                a.cost_per_day = (cpd > 0.0).then_some(cpd);
            }
            if let Some(url) = req.file_url {
                a.file_url = Some(url);
            }
            if let Some(url) = req.thumbnail_url {
                a.thumbnail_url = Some(url);
            }
            if let Some(size) = req.file_size {
                a.file_size = Some(size);
            }
            a.updated_at = Utc::now();
            self.log_audit(
                actor,
                AuditAction::Update,
                "asset",
                &id.to_string(),
                serde_json::json!({}),
            );
            a.clone()
        })
    }

    pub fn delete_asset(&self, id: Uuid, actor: &str) -> bool {
        let removed = self.assets.remove(&id).is_some();
        if removed {
            self.log_audit(
                actor,
                AuditAction::Delete,
                "asset",
                &id.to_string(),
                serde_json::json!({}),
            );
        }
        removed
    }

    // ─── Audit log ─────────────────────────────────────────────────────────

    pub fn get_audit_log(&self) -> Vec<CatalogAuditEntry> {
        let mut entries: Vec<CatalogAuditEntry> =
            self.audit_log.iter().map(|r| r.value().clone()).collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    fn log_audit(
        &self,
        actor: &str,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        details: serde_json::Value,
    ) {
        let entry = CatalogAuditEntry {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            details,
            timestamp: Utc::now(),
        };
        self.audit_log.insert(entry.id, entry);
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads are point-in-time snapshots of the maps. There is no transaction
/// spanning the two quotation fetches; a mutation landing between them is
/// observable, matching the consistency model of a single remote read.
impl CatalogSource for CatalogStore {
    fn platforms_by_ids(&self, ids: &[Uuid]) -> QuoteResult<Vec<Platform>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.platforms.get(id).map(|r| r.value().clone()))
            .collect())
    }

    fn assets_by_platform_ids(&self, ids: &[Uuid]) -> QuoteResult<Vec<Asset>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut assets: Vec<Asset> = self
            .assets
            .iter()
            .filter(|r| ids.contains(&r.value().platform_id))
            .map(|r| r.value().clone())
            .collect();
        assets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaquote_core::types::{AssetCategory, BuyType, Industry, Placement};
    use serde_json::json;

    fn platform_request(name: &str) -> CreatePlatformRequest {
        CreatePlatformRequest {
            name: name.to_string(),
            industry: Industry::Qsr,
            audience: json!({
                "demographic": {"age_groups": ["18-24"], "interests": ["food"]},
                "geographic": {"cities": ["Bengaluru"]},
            }),
            mau: Some("22,000,000".to_string()),
            dau: Some("3.5M".to_string()),
            premium_user_pct: Some(140.0),
            device_split: Default::default(),
            logo_url: None,
        }
    }

    fn asset_request(platform_id: Uuid, name: &str) -> CreateAssetRequest {
        CreateAssetRequest {
            platform_id,
            name: name.to_string(),
            category: AssetCategory::Digital,
            asset_type: "banner".to_string(),
            tags: vec!["homepage".to_string()],
            placement: Placement::HomeScreen,
            buy_type: BuyType::Cpm,
            amount: 50_000.0,
            base_cost: 1_200.0,
            estimated_clicks: Some(4_000),
            estimated_impressions: Some(900_000),
            cost_per_day: None,
            file_url: None,
            thumbnail_url: None,
            file_size: None,
        }
    }

    #[test]
    fn test_create_platform_normalizes_metadata() {
        let store = CatalogStore::new();
        let platform = store.create_platform(platform_request("SnackDash"), "tester");

        assert_eq!(platform.mau, Some(22_000_000));
        assert_eq!(platform.dau, Some(3_500_000));
        // out-of-range percentage is clamped on ingest
        assert_eq!(platform.premium_user_pct, Some(100.0));
        assert_eq!(platform.audience.demographic.age_groups, vec!["18-24"]);
        assert_eq!(platform.audience.geographic.cities, vec!["Bengaluru"]);
    }

    #[test]
    fn test_delete_platform_blocked_while_assets_exist() {
        let store = CatalogStore::new();
        let platform = store.create_platform(platform_request("SnackDash"), "tester");
        store
            .create_asset(asset_request(platform.id, "Home Banner"), "tester")
            .unwrap();

        let err = store.delete_platform(platform.id, "tester").unwrap_err();
        assert!(matches!(err, QuoteError::PlatformInUse { asset_count: 1, .. }));

        // removing the asset unblocks the delete
        let asset_id = store.assets_for_platform(platform.id)[0].id;
        assert!(store.delete_asset(asset_id, "tester"));
        store.delete_platform(platform.id, "tester").unwrap();
        assert!(store.get_platform(platform.id).is_none());
    }

    #[test]
    fn test_create_asset_rejects_unknown_platform() {
        let store = CatalogStore::new();
        let err = store
            .create_asset(asset_request(Uuid::new_v4(), "Orphan"), "tester")
            .unwrap_err();
        assert!(matches!(err, QuoteError::PlatformNotFound(_)));
    }

    #[test]
    fn test_catalog_source_filters_by_ids() {
        let store = CatalogStore::new();
        let p1 = store.create_platform(platform_request("SnackDash"), "tester");
        let p2 = store.create_platform(platform_request("CartHive"), "tester");
        store
            .create_asset(asset_request(p1.id, "Home Banner"), "tester")
            .unwrap();
        store
            .create_asset(asset_request(p2.id, "Checkout Card"), "tester")
            .unwrap();

        let platforms = store.platforms_by_ids(&[p1.id]).unwrap();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].id, p1.id);

        let assets = store.assets_by_platform_ids(&[p1.id]).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].platform_id, p1.id);

        assert!(store.platforms_by_ids(&[]).unwrap().is_empty());
        assert!(store.assets_by_platform_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_mutations_append_audit_entries() {
        let store = CatalogStore::new();
        let platform = store.create_platform(platform_request("SnackDash"), "ops");
        store.update_platform(
            platform.id,
            UpdatePlatformRequest {
                name: Some("SnackDash Prime".to_string()),
                ..Default::default()
            },
            "ops",
        );

        let log = store.get_audit_log();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|e| e.actor == "ops"));
        assert!(log.iter().any(|e| e.action == AuditAction::Update));
    }
}
