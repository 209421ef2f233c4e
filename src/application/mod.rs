// Application layer - Use cases and the repository seam
pub mod dashboard_service;
pub mod query_repository;
pub mod refresh_loop;
