pub mod payment_request_controller;

pub use payment_request_controller::configure;
