pub mod integration_request;

pub use integration_request::{IntegrationRequest, RequestStatus};
