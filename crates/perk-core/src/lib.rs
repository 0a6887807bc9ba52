//! # perk-core
//!
//! Domain layer containing entities, geofence math, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod geo;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{generate_token_code, Customer, QrToken, Reward, Visit, FREE_COFFEE};
pub use error::DomainError;
pub use geo::{haversine_meters, Coordinate, Geofence, GeofenceCheck};
pub use traits::{
    CheckinPolicy, CustomerRepository, LedgerRepository, RepoResult, SettlementOutcome,
    TokenRepository, TokenStatus,
};
