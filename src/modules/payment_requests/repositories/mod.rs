pub mod payment_request_repository;

pub use payment_request_repository::PaymentRequestRepository;
