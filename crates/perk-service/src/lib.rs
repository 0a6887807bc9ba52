//! # perk-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    CheckinRequest, CheckinResponse, CustomerResponse, GenerateTokenRequest, HealthResponse,
    NotificationRecordResponse, ReadinessResponse, RegisterRequest, RewardResponse,
    TokenIssuedResponse, TokenValidationResponse, ValidateTokenRequest, VisitResponse,
};
pub use services::{
    CheckinService, CustomerService, NotificationChannel, NotificationDispatcher, NotificationLog,
    NotificationRecord, RewardNotice, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TokenService,
};
