pub mod gateway_repository;
pub mod settings_repository;

pub use gateway_repository::GatewayRepository;
pub use settings_repository::SettingsRepository;
