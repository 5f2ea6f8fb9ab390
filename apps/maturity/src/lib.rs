//! # Maturity Library
//!
//! This library exposes the Maturity Explorer modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod preflight;
pub mod render;
pub mod telemetry;

// Re-export maturity_core for convenience
pub use maturity_core;
