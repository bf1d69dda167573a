pub mod handlers;
pub mod router;

pub use handlers::ApiState;
pub use router::api_router;
