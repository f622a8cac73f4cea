//! Midtrans Snap payment gateway integration.
//!
//! Validates transaction currencies, creates Snap transactions and hands the
//! payer a checkout URL, and resolves which gateway controller serves a
//! stored payment request.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::gateways;
pub use modules::integrations;
pub use modules::payment_requests;
