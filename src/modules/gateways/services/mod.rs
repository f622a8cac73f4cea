pub mod gateway_service;
pub mod gateway_trait;
pub mod midtrans;
pub mod settings_service;
pub mod snap;

pub use gateway_service::GatewayService;
pub use gateway_trait::{GatewayController, GatewayInfo};
pub use midtrans::{MidtransController, CHECKOUT_PATH};
pub use settings_service::MidtransSettingsService;
pub use snap::{
    snap_js_url, CreditCard, SnapApi, SnapClient, SnapOptions, SnapTransaction,
    SnapTransactionRequest, TransactionDetails,
};
