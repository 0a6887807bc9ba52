//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in perk-core.

mod customer;
mod error;
mod ledger;
mod qr_token;

pub use customer::PgCustomerRepository;
pub use ledger::PgLedgerRepository;
pub use qr_token::PgTokenRepository;
