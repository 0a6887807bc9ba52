//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod checkin;
pub mod health;
pub mod qr;
