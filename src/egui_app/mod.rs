//! Shared egui UI modules.

/// Bridges UI state to the classifier client and background jobs.
pub mod controller;
/// Shared state types consumed by the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
