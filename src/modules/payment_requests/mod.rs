pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::PaymentRequest;
pub use repositories::PaymentRequestRepository;
pub use services::PaymentRequestService;
