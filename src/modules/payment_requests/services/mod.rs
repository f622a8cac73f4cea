pub mod payment_request_service;

pub use payment_request_service::PaymentRequestService;
