//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CheckinPolicy, CustomerRepository, LedgerRepository, RepoResult, SettlementOutcome,
    TokenRepository, TokenStatus,
};
