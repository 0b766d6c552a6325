//! # Corkboard API gateway
//!
//! Library half of the `corkboard-api` binary, split out so integration
//! tests can build the router without spawning a process.
//!
//! - `app`: state container and router builder
//! - `config`: environment-driven configuration
//! - `error`: the `ApiError` funnel and its wire format
//! - `middleware`: response hardening layers
//! - `routes`: one module per resource

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
