//! Application services

mod checkin;
mod context;
mod customer;
mod error;
mod notify;
mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use checkin::CheckinService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use customer::CustomerService;
pub use error::{ServiceError, ServiceResult};
pub use notify::{
    EmailChannel, NotificationChannel, NotificationDispatcher, NotificationLog,
    NotificationRecord, RewardNotice, SmsWebhookChannel, WebLogChannel,
};
pub use token::TokenService;
