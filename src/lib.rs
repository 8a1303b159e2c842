//! Core library for the `loadprobe` CLI.
//!
//! Sends a fixed number of GET requests to one target with a bounded number
//! in flight, classifies every outcome, and aggregates the run into a
//! summary with latency percentiles and per-kind failure counts. The
//! binary is a thin shell over [`entry::run`]; the pieces are public so the
//! dispatcher and collector can be driven with a custom
//! [`http::RequestExecutor`].
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
