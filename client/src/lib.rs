//! Client for the EnvSync API.
//!
//! Covers the subset of the API the console drives: applications, environment
//! types, environment variables and audit logs.

pub mod client;
pub mod config;
pub mod store;
pub mod types;

#[cfg(test)]
mod testutils;

pub use client::{ApiClient, ClientError};
pub use config::ApiConfig;
pub use store::VariableStore;
