//! # Corkboard Client
//!
//! HTTP client facade and screen view-models for the Corkboard API.
//!
//! The crate is split into:
//! - `api`: typed facade over the gateway's JSON endpoints
//! - `storage`: attachment uploads to the file store
//! - `screens`: per-screen state with optimistic mutation and
//!   forced-refetch reconciliation
//! - `error`: the client-side error taxonomy

pub mod api;
pub mod error;
pub mod screens;
pub mod storage;

pub use api::{CorkboardClient, SessionProfile};
pub use error::{ClientError, ErrorKind};
pub use screens::Screen;
