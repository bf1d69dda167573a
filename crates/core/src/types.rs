//! Domain types shared across the catalog, quotation engine, and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::normalize;

// ─── Platform ──────────────────────────────────────────────────────────────

/// An advertising surface (app, site, or physical property) that owns
/// zero or more sellable assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub industry: Industry,
    #[serde(default)]
    pub audience: AudienceData,
    /// Monthly active users, if reported by the platform.
    pub mau: Option<u64>,
    /// Daily active users, if reported by the platform.
    pub dau: Option<u64>,
    /// Share of users on a paid tier, 0–100.
    pub premium_user_pct: Option<f64>,
    #[serde(default)]
    pub device_split: DeviceSplit,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Qsr,
    Ecommerce,
    Travel,
    Fintech,
    Entertainment,
    Grocery,
    Mobility,
    Other,
}

/// Audience targeting metadata for a platform.
///
/// Clients historically supplied this as free-form JSON with every key
/// optional. [`AudienceData::from_json`] normalizes that shape once at the
/// storage boundary; everything downstream sees fully-resolved lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceData {
    #[serde(default)]
    pub demographic: DemographicData,
    #[serde(default)]
    pub geographic: GeographicData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemographicData {
    #[serde(default)]
    pub age_groups: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeographicData {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub tiers: Vec<String>,
}

impl AudienceData {
    /// Normalize a free-form audience blob. Absent keys, nulls, and
    /// non-array values all resolve to empty lists; scalar strings are
    /// promoted to single-element lists.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let demo = &value["demographic"];
        let geo = &value["geographic"];
        Self {
            demographic: DemographicData {
                age_groups: normalize::string_list(&demo["age_groups"]),
                genders: normalize::string_list(&demo["genders"]),
                interests: normalize::string_list(&demo["interests"]),
            },
            geographic: GeographicData {
                cities: normalize::string_list(&geo["cities"]),
                states: normalize::string_list(&geo["states"]),
                tiers: normalize::string_list(&geo["tiers"]),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.demographic.age_groups.is_empty()
            && self.demographic.genders.is_empty()
            && self.demographic.interests.is_empty()
            && self.geographic.cities.is_empty()
            && self.geographic.states.is_empty()
            && self.geographic.tiers.is_empty()
    }
}

/// Device distribution percentages, 0–100 each. Not required to sum
/// to 100; values are clamped on ingest.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeviceSplit {
    pub ios: f64,
    pub android: f64,
    pub web: f64,
}

impl DeviceSplit {
    pub fn clamped(self) -> Self {
        Self {
            ios: self.ios.clamp(0.0, 100.0),
            android: self.android.clamp(0.0, 100.0),
            web: self.web.clamp(0.0, 100.0),
        }
    }
}

// ─── Asset ─────────────────────────────────────────────────────────────────

/// A sellable creative/placement unit belonging to exactly one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub platform_id: Uuid,
    pub name: String,
    pub category: AssetCategory,
    /// Free-text asset type, e.g. "banner", "sampling kiosk".
    pub asset_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub placement: Placement,
    pub buy_type: BuyType,
    /// Author-entered flat monetary amount for this asset.
    pub amount: f64,
    /// Author-entered base cost estimate.
    pub base_cost: f64,
    pub estimated_clicks: Option<u64>,
    pub estimated_impressions: Option<u64>,
    /// Author-entered per-day cost; resolved by the pricing model when absent.
    pub cost_per_day: Option<f64>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_size: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Digital,
    Physical,
    Phygital,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    HomeScreen,
    SearchResults,
    Checkout,
    OrderTracking,
    InStore,
    PackageInsert,
    RideScreen,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuyType {
    Cpc,
    Cpm,
    Flat,
}

// ─── Campaign request ──────────────────────────────────────────────────────

/// Campaign run length. The single canonical representation: either an
/// explicit day count or an inclusive calendar date range, resolved once
/// at the engine boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignDuration {
    Days(u32),
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl CampaignDuration {
    /// Resolve to a day count, always >= 1. A date range counts both
    /// endpoints; an inverted range collapses to 1.
    pub fn days(&self) -> u32 {
        match *self {
            CampaignDuration::Days(n) => n.max(1),
            CampaignDuration::DateRange { start, end } => {
                let span = (end - start).num_days() + 1;
                span.max(1) as u32
            }
        }
    }
}

impl Default for CampaignDuration {
    fn default() -> Self {
        CampaignDuration::Days(1)
    }
}

/// Ephemeral quotation input. Never persisted; each engine invocation
/// receives its own request and produces its own result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRequest {
    pub industry: Option<Industry>,
    #[serde(default)]
    pub demographics: DemographicData,
    #[serde(default)]
    pub geographics: GeographicData,
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Allowed asset categories; empty means no filter.
    #[serde(default)]
    pub asset_categories: Vec<AssetCategory>,
    #[serde(default)]
    pub premium_only: bool,
    pub total_budget: f64,
    #[serde(default)]
    pub duration: CampaignDuration,
    /// Platforms the buyer wants quoted, in preference order.
    #[serde(default)]
    pub platform_preferences: Vec<Uuid>,
    /// Optional explicit per-platform asset picks. Platforms without an
    /// entry keep all their candidate assets.
    #[serde(default)]
    pub asset_selection: Option<HashMap<Uuid, Vec<Uuid>>>,
}

// ─── Quotation result ──────────────────────────────────────────────────────

/// An asset annotated with resolved pricing, score, and allocated budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotedAsset {
    pub asset: Asset,
    pub cost_per_day: f64,
    pub estimated_impressions: u64,
    pub targeting_score: f64,
    pub allocated_budget: f64,
}

/// One platform's slice of a quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformQuote {
    pub platform: Platform,
    pub assets: Vec<QuotedAsset>,
    pub total_cost: f64,
    pub total_impressions: u64,
}

/// Output of one engine run. Exists only for the duration of a single
/// response; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationResult {
    pub platforms: Vec<PlatformQuote>,
    pub total_cost: f64,
    pub total_impressions: u64,
    pub campaign_days: u32,
}

impl QuotationResult {
    /// The canonical empty result returned for unmet preconditions.
    pub fn empty(campaign_days: u32) -> Self {
        Self {
            platforms: Vec::new(),
            total_cost: 0.0,
            total_impressions: 0,
            campaign_days,
        }
    }
}
