//! Database pool, schema and seed data

pub mod init;
pub mod migrations;
pub mod seed;

pub use init::{connect_pool, create_schema, init_database, PoolSettings};
pub use migrations::{get_schema_version, run_migrations, CURRENT_SCHEMA_VERSION};
pub use seed::{seed_demo_catalog, SeedSummary};
