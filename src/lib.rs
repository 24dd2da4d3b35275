// ABOUTME: Library root for dockbridge - REST gateway for local container engines.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod types;
