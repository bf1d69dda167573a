//! Targeting scorer — how well an asset's owning platform matches the
//! campaign's demographic/geographic criteria.
//!
//! Every asset starts at the base score. Five dimensions are checked (age
//! groups, genders, interests, cities, states); a dimension contributes a
//! flat bonus when the platform's audience list and the request's list
//! intersect at all — binary per dimension, independent of how many values
//! overlap. Absence of data never penalizes: the scorer has no negative
//! signal, only "good" or "indifferent" fits.

use mediaquote_core::normalize::lists_overlap;
use mediaquote_core::types::{AudienceData, CampaignRequest, Platform, QuotedAsset};

pub const BASE_SCORE: f64 = 1.0;
pub const DIMENSION_BONUS: f64 = 0.2;
/// Base plus all five dimension bonuses.
pub const MAX_SCORE: f64 = 2.0;

/// Score one platform's audience against the request criteria.
pub fn targeting_score(audience: &AudienceData, request: &CampaignRequest) -> f64 {
    let dimensions = [
        lists_overlap(
            &audience.demographic.age_groups,
            &request.demographics.age_groups,
        ),
        lists_overlap(&audience.demographic.genders, &request.demographics.genders),
        lists_overlap(
            &audience.demographic.interests,
            &request.demographics.interests,
        ),
        lists_overlap(&audience.geographic.cities, &request.geographics.cities),
        lists_overlap(&audience.geographic.states, &request.geographics.states),
    ];

    let bonus = dimensions.iter().filter(|hit| **hit).count() as f64 * DIMENSION_BONUS;
    BASE_SCORE + bonus
}

/// Annotate each candidate with its targeting score. An asset whose
/// owning platform is not in `platforms` keeps the base score.
pub fn score_assets(
    candidates: &mut [QuotedAsset],
    platforms: &[Platform],
    request: &CampaignRequest,
) {
    for candidate in candidates.iter_mut() {
        let score = platforms
            .iter()
            .find(|p| p.id == candidate.asset.platform_id)
            .map(|p| targeting_score(&p.audience, request))
            .unwrap_or(BASE_SCORE);
        candidate.targeting_score = score;
    }
}
