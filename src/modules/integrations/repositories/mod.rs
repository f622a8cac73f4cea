pub mod integration_request_repository;

pub use integration_request_repository::IntegrationRequestRepository;
