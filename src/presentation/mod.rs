// Presentation layer - HTTP surface for the UI shell
pub mod app_state;
pub mod handlers;
