//! Catalog request/response types and the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mediaquote_core::types::{AssetCategory, BuyType, DeviceSplit, Industry, Placement};

// ─── Platform requests ─────────────────────────────────────────────────────

/// Payload for creating a platform. `audience` is accepted as free-form
/// JSON and normalized once on ingest; `mau`/`dau` are free-text counts
/// ("22,000,000", "22M") parsed leniently.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlatformRequest {
    pub name: String,
    pub industry: Industry,
    #[serde(default)]
    pub audience: serde_json::Value,
    pub mau: Option<String>,
    pub dau: Option<String>,
    pub premium_user_pct: Option<f64>,
    #[serde(default)]
    pub device_split: DeviceSplit,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlatformRequest {
    pub name: Option<String>,
    pub industry: Option<Industry>,
    pub audience: Option<serde_json::Value>,
    pub mau: Option<String>,
    pub dau: Option<String>,
    pub premium_user_pct: Option<f64>,
    pub device_split: Option<DeviceSplit>,
    pub logo_url: Option<String>,
}

// ─── Asset requests ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssetRequest {
    pub platform_id: Uuid,
    pub name: String,
    pub category: AssetCategory,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub placement: Placement,
    pub buy_type: BuyType,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub base_cost: f64,
    pub estimated_clicks: Option<u64>,
    pub estimated_impressions: Option<u64>,
    pub cost_per_day: Option<f64>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub category: Option<AssetCategory>,
    pub asset_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub placement: Option<Placement>,
    pub buy_type: Option<BuyType>,
    pub amount: Option<f64>,
    pub base_cost: Option<f64>,
    pub estimated_clicks: Option<u64>,
    pub estimated_impressions: Option<u64>,
    pub cost_per_day: Option<f64>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_size: Option<u64>,
}

// ─── Audit log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogAuditEntry {
    pub id: Uuid,
    pub actor: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}
