use actix_web::{web, App, HttpServer};
use anyhow::Context;
use midtrans_gateway::config::{Config, DatabaseConfig};
use midtrans_gateway::gateways::{
    GatewayRepository, GatewayService, MidtransSettingsService, SettingsRepository,
};
use midtrans_gateway::integrations::IntegrationRequestRepository;
use midtrans_gateway::middleware::{hash_api_key, ApiKeyAuth, RequestId};
use midtrans_gateway::modules;
use midtrans_gateway::payment_requests::{PaymentRequestRepository, PaymentRequestService};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-api-key") {
        let key = args.next().context("Usage: midtrans-gateway hash-api-key <key>")?;
        println!("{}", hash_api_key(&key)?);
        return Ok(());
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    let json_logs = config.log_as_json();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "midtrans_gateway={},actix_web=info",
                    config.app.log_level
                )
                .into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Midtrans gateway");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;
    DatabaseConfig::migrate(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let gateway_repository = GatewayRepository::new(db_pool.clone());
    let settings_service = MidtransSettingsService::new(
        SettingsRepository::new(db_pool.clone()),
        gateway_repository.clone(),
        IntegrationRequestRepository::new(db_pool.clone()),
        config.midtrans.snap_options(),
        config.app.site_url.clone(),
    );
    let payment_request_service = PaymentRequestService::new(
        PaymentRequestRepository::new(db_pool.clone()),
        gateway_repository,
    );

    let gateway_service = web::Data::new(GatewayService::new());
    match settings_service
        .bootstrap(config.midtrans.bootstrap_keys(), config.midtrans.sandbox)
        .await
        .context("Failed to load Midtrans settings")?
    {
        Some(settings) => {
            settings_service.activate(&gateway_service, settings)?;
        }
        None => tracing::warn!(
            "Midtrans settings not configured; save them via PUT /midtrans/settings"
        ),
    }

    let auth = ApiKeyAuth::new(&config.security.api_key_hash)?;
    let settings_service = web::Data::new(settings_service);
    let payment_request_service = web::Data::new(payment_request_service);

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(gateway_service.clone())
            .app_data(settings_service.clone())
            .app_data(payment_request_service.clone())
            .configure(modules::configure(auth.clone()))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
