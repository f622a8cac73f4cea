pub mod midtrans_settings;
pub mod payment_details;
pub mod payment_gateway;

pub use midtrans_settings::{
    MidtransSettings, SettingsFlags, GATEWAY_NAME, SETTINGS_NAME, SUPPORTED_CURRENCIES,
};
pub use payment_details::{PaymentDetails, SubscriptionDetails};
pub use payment_gateway::PaymentGateway;
