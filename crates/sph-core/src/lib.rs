//! sph-core: shared foundation for the particle thermodynamics crates.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact per-particle IDs)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
