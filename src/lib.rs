//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Remote classification service client.
pub mod classifier;
/// Persisted application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP client configuration.
pub mod http_client;
/// Tracing setup.
pub mod logging;
