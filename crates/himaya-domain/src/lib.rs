//! Domain models for civil-protection intervention statistics
//!
//! This crate provides the canonical types shared across the himaya suite:
//! - WilayaRecord: one day's intervention counters for one wilaya
//! - Category: the six fixed incident categories tracked per record
//! - The static wilaya catalog (58 administrative regions)
//! - Derived totals and the national-level GlobalStats roll-up

pub mod aggregate;
pub mod category;
pub mod counts;
pub mod record;
pub mod validation;
pub mod wilayas;

pub use aggregate::*;
pub use category::*;
pub use counts::*;
pub use record::*;
pub use validation::*;
pub use wilayas::*;
