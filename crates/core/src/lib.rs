pub mod catalog;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::AppConfig;
pub use error::{QuoteError, QuoteResult};
