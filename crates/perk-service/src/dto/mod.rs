//! Data transfer objects for the API surface

mod requests;
mod responses;

pub use requests::{CheckinRequest, GenerateTokenRequest, RegisterRequest, ValidateTokenRequest};
pub use responses::{
    CheckinResponse, CustomerResponse, HealthResponse, NotificationRecordResponse,
    ReadinessResponse, RewardResponse, TokenIssuedResponse, TokenValidationResponse, VisitResponse,
};
