//! Domain entities - core business objects

mod customer;
mod qr_token;
mod reward;
mod visit;

pub use customer::Customer;
pub use qr_token::{generate_token_code, QrToken};
pub use reward::{Reward, FREE_COFFEE};
pub use visit::Visit;
