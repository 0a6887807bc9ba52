//! Axum extractors for request handling
//!
//! Custom extractors for admin authentication, validation, and pagination.

mod admin;
mod pagination;
mod validated;

pub use admin::{AdminKey, ADMIN_KEY_HEADER};
pub use pagination::{Pagination, PaginationParams};
pub use validated::ValidatedJson;
