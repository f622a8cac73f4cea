pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{
    MidtransSettings, PaymentDetails, PaymentGateway, SettingsFlags, SubscriptionDetails,
    GATEWAY_NAME, SETTINGS_NAME, SUPPORTED_CURRENCIES,
};
pub use repositories::{GatewayRepository, SettingsRepository};
pub use services::{
    GatewayController, GatewayInfo, GatewayService, MidtransController, MidtransSettingsService,
    SnapApi, SnapClient, SnapOptions, SnapTransaction, SnapTransactionRequest,
};
