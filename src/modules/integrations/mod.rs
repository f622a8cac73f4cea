//! Outbound request log for payment provider calls
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{IntegrationRequest, RequestStatus};
pub use repositories::IntegrationRequestRepository;
pub use services::RequestLog;
