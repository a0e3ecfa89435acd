//! calma-app
//!
//! Host wiring for the Calma engine: configuration, logging, the
//! process-lifetime context shared by the views, and the one-second
//! ticker that drives running sessions.

pub mod config;
pub mod context;
pub mod telemetry;
pub mod ticker;
