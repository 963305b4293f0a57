// ABOUTME: Library root for localdev - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod error;
pub mod graph;
pub mod lifecycle;
pub mod network;
pub mod output;
pub mod runtime;
pub mod types;
