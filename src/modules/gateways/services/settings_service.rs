use std::sync::Arc;

use tracing::{info, warn};

use super::gateway_service::GatewayService;
use super::midtrans::MidtransController;
use super::snap::SnapOptions;
use crate::core::{AppError, Result};
use crate::modules::gateways::models::{
    MidtransSettings, PaymentGateway, SettingsFlags, GATEWAY_NAME, SETTINGS_NAME,
};
use crate::modules::gateways::repositories::{GatewayRepository, SettingsRepository};
use crate::modules::integrations::IntegrationRequestRepository;

/// Settings lifecycle for the Midtrans integration: validate, persist,
/// register the gateway row, and build controllers from stored settings.
#[derive(Clone)]
pub struct MidtransSettingsService {
    settings: SettingsRepository,
    gateways: GatewayRepository,
    request_log: IntegrationRequestRepository,
    snap_options: SnapOptions,
    site_url: String,
}

impl MidtransSettingsService {
    pub fn new(
        settings: SettingsRepository,
        gateways: GatewayRepository,
        request_log: IntegrationRequestRepository,
        snap_options: SnapOptions,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            gateways,
            request_log,
            snap_options,
            site_url: site_url.into(),
        }
    }

    pub async fn load(&self) -> Result<MidtransSettings> {
        self.settings
            .get()
            .await?
            .ok_or_else(|| AppError::not_found(SETTINGS_NAME))
    }

    /// Validate and store settings, then make sure the Midtrans gateway row
    /// points at them. An omitted server key keeps the stored one, since reads
    /// never return it.
    pub async fn save(
        &self,
        settings: &MidtransSettings,
        flags: SettingsFlags,
    ) -> Result<MidtransSettings> {
        let mut settings = settings.clone();
        if settings.server_key.is_empty() {
            if let Some(existing) = self.settings.get().await? {
                settings.server_key = existing.server_key;
            }
        }

        settings.validate(flags)?;
        self.settings.save(&settings).await?;
        self.gateways
            .upsert(&PaymentGateway::new(GATEWAY_NAME, SETTINGS_NAME, SETTINGS_NAME))
            .await?;

        info!(
            sandbox = settings.midtrans_sandbox,
            "Midtrans settings saved"
        );

        self.load().await
    }

    /// Controller for the given settings, logging Snap calls
    pub fn build_controller(&self, settings: MidtransSettings) -> Result<Arc<MidtransController>> {
        let controller =
            MidtransController::from_settings(settings, &self.snap_options, &self.site_url)?
                .with_request_log(Arc::new(self.request_log.clone()));
        Ok(Arc::new(controller))
    }

    /// Put the registry in line with the given settings: complete settings
    /// register a fresh controller, drafts saved with `ignore_mandatory`
    /// take the gateway offline. Returns whether Midtrans is now registered.
    pub fn activate(&self, gateways: &GatewayService, settings: MidtransSettings) -> Result<bool> {
        if let Err(e) = settings.validate(SettingsFlags::default()) {
            warn!(error = %e, "Midtrans settings incomplete; gateway not registered");
            gateways.unregister(GATEWAY_NAME)?;
            return Ok(false);
        }

        gateways.register(self.build_controller(settings)?)?;
        Ok(true)
    }

    /// Seed settings from configured keys on first start; stored settings win.
    /// Returns the settings in effect, if any.
    pub async fn bootstrap(
        &self,
        keys: Option<(&str, &str)>,
        sandbox: bool,
    ) -> Result<Option<MidtransSettings>> {
        if let Some(existing) = self.settings.get().await? {
            return Ok(Some(existing));
        }

        match keys {
            Some((server_key, client_key)) => {
                let settings = MidtransSettings::new(server_key, client_key, sandbox);
                let saved = self.save(&settings, SettingsFlags::default()).await?;
                info!("Midtrans settings seeded from environment");
                Ok(Some(saved))
            }
            None => Ok(None),
        }
    }
}
