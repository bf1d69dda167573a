//! Read-side seam between the quotation engine and the catalog store.

use uuid::Uuid;

use crate::error::QuoteResult;
use crate::types::{Asset, Platform};

/// Read access to platform and asset records.
///
/// Implementations must return an empty list for an empty id set without
/// touching the backing store; an unbounded fetch-all is never issued on
/// behalf of a quotation. Store failures propagate unchanged — no retries,
/// no partial-result suppression.
pub trait CatalogSource: Send + Sync {
    /// All platforms whose id is in `ids`.
    fn platforms_by_ids(&self, ids: &[Uuid]) -> QuoteResult<Vec<Platform>>;

    /// All assets owned by any platform in `ids`.
    fn assets_by_platform_ids(&self, ids: &[Uuid]) -> QuoteResult<Vec<Asset>>;
}
