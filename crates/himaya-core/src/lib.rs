//! Service boundary for the wilaya statistics dashboard
//!
//! `DashboardService` is the only surface callers are expected to use: it
//! authenticates, gates every operation on the session's wilaya access,
//! validates dates against the zero-padded ISO form, and then delegates to
//! the dual-store facade, the aggregator, and the file adapters.

pub mod error;
pub mod service;

pub use error::HimayaError;
pub use service::{DashboardService, ImportTarget};
