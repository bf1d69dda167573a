use thiserror::Error;
use uuid::Uuid;

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid quotation request: {0}")]
    InvalidRequest(String),

    #[error("Platform not found: {0}")]
    PlatformNotFound(Uuid),

    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    #[error("Platform {platform_id} still owns {asset_count} assets")]
    PlatformInUse {
        platform_id: Uuid,
        asset_count: usize,
    },

    #[error("Catalog store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
