// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod pinot_repository;
pub mod query_cache;
