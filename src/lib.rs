//! Healthcare ad compliance analysis service.
//!
//! Accepts advertising copy (plus an optional image reference) for a
//! healthcare-related product and returns a structured compliance report
//! scored against platform advertising policies. The judgment is delegated
//! to an external multimodal reasoning service; this crate owns deterministic
//! prompt construction, request orchestration, and strict validation of the
//! untrusted response.

pub mod api;
pub mod app;
pub mod model;
pub mod policy;
pub mod service;
