//! HTTP API handlers for soundvault-api

pub mod analytics;
pub mod buildinfo;
pub mod envelope;
pub mod health;
pub mod placeholders;
pub mod resource;

pub use analytics::analytics_routes;
pub use buildinfo::get_build_info;
pub use envelope::Envelope;
pub use health::health_routes;
pub use placeholders::{auth_routes, royalty_routes};
pub use resource::resource_routes;
