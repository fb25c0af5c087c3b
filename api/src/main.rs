use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ks_api::{config, create_app, telemetry, AppState};
use ks_core::services::{
    AuthService, LedgerCleanupConfig, LedgerCleanupService, SigningKeys, TokenService,
    TokenServiceConfig,
};
use ks_infra::database::ensure_schema;
use ks_infra::{DatabasePool, IdentityBackend, LedgerBackend};
use ks_shared::config::{IdentityStoreKind, LedgerBackendKind};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load()?;
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        ledger = %config.ledger.backend,
        identity_store = %config.auth.identity_store,
        "Starting Keystone"
    );

    // Built once; the token service owns them from here on
    let keys = SigningKeys::from_jwt_config(&config.auth.jwt)
        .context("Failed to load signing keys")?;

    let needs_database = config.ledger.backend == LedgerBackendKind::MySql
        || config.auth.identity_store == IdentityStoreKind::MySql;
    let database = if needs_database {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Failed to connect to MySQL")?;
        ensure_schema(&pool).await.context("Failed to prepare schema")?;
        Some(pool)
    } else {
        None
    };

    let ledger = Arc::new(
        LedgerBackend::connect(&config.ledger, database.as_ref(), &config.cache)
            .await
            .context("Failed to initialize revocation ledger")?,
    );
    let identities = Arc::new(
        IdentityBackend::connect(&config.auth, database.as_ref())
            .context("Failed to initialize identity store")?,
    );

    let token_service = Arc::new(TokenService::new(
        ledger.clone(),
        identities.clone(),
        keys,
        TokenServiceConfig::from_jwt_config(&config.auth.jwt)
            .context("Invalid token lifetimes")?,
    ));
    let auth_service = Arc::new(AuthService::new(identities, token_service));

    let cleanup = Arc::new(LedgerCleanupService::new(
        ledger,
        LedgerCleanupConfig::from(&config.ledger),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(auth_service));
    let json_limit = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), json_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("HTTP server stopped");

    if let Some(task) = cleanup_task {
        task.abort();
    }
    if let Some(pool) = database {
        pool.close().await;
    }

    Ok(())
}
