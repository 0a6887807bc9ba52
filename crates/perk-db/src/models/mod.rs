//! Database models - SQLx-compatible structs for PostgreSQL tables
//!
//! Each model carries its `From<Model> for Entity` mapping, keeping
//! `perk-core` free of any sqlx dependency.

mod customer;
mod qr_token;
mod reward;
mod visit;

pub use customer::CustomerModel;
pub use qr_token::QrTokenModel;
pub use reward::RewardModel;
pub use visit::VisitModel;
