/// Database configuration and connection management
pub mod database;

/// Planner settings and seed catalog loading from config.toml
pub mod planner;

/// Preconfigured local account from environment variables
pub mod users;
