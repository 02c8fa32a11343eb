//! Lumen - metrics dashboard backend for LLM serving deployments
//!
//! This library fans out Prometheus queries for every dashboard section,
//! shapes the results into chart-ready snapshots, and substitutes mock data
//! per section when the backend is missing or a query fails.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod metrics;
pub mod prometheus;
