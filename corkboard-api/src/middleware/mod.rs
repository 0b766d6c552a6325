/// Hand-rolled middleware for the gateway
///
/// Session authentication lives in `corkboard_shared::auth::middleware`;
/// only the response-hardening layers are local to this crate.

pub mod security;
