//! Common ground between the Corkboard API server and its client.
//!
//! Everything both sides must agree on lives here: the row types and
//! queries (`models`), password and session handling (`auth`), and the
//! Postgres plumbing (`db`). The API gateway and the client crates add
//! their own layers on top but never redefine these.

pub mod auth;
pub mod db;
pub mod models;

/// Version of this library, taken from the crate manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
