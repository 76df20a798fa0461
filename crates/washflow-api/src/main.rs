//! Washflow API server entry point.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use washflow_api::config::{Config, SlotBackend};
use washflow_api::error::AppError;
use washflow_api::state::AppState;
use washflow_api::telemetry;
use washflow_appointments::application::engine::WashflowEngine;
use washflow_catalog::application::catalog::{Catalog, parse_definition};
use washflow_catalog::application::directory::Directory;
use washflow_core::clock::SystemClock;
use washflow_core::error::DomainError;
use washflow_core::ids::UuidIdGenerator;
use washflow_core::slot::DurableSlot;
use washflow_slot_store::file_slot::FileSlot;
use washflow_slot_store::pg_slot::PgSlot;

async fn open_slot(backend: &SlotBackend) -> Result<Arc<dyn DurableSlot>, AppError> {
    match backend {
        SlotBackend::Postgres(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await?;
            let slot = PgSlot::new(pool);
            slot.ensure_schema().await?;
            tracing::info!("using PostgreSQL slot");
            Ok(Arc::new(slot))
        }
        SlotBackend::File(dir) => {
            tracing::info!(dir = %dir.display(), "using file slot");
            Ok(Arc::new(FileSlot::new(dir.clone())))
        }
    }
}

async fn load_catalog(config: &Config) -> Result<(Catalog, Directory), AppError> {
    let Some(path) = &config.catalog_path else {
        return Ok((Catalog::builtin(), Directory::builtin()));
    };
    let invalid = |e: DomainError| AppError::Config(format!("{}: {e}", path.display()));

    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let definition = parse_definition(&yaml).map_err(invalid)?;
    let catalog = Catalog::from_definition(&definition).map_err(invalid)?;
    let directory = Directory::from_definition(&definition, &catalog).map_err(invalid)?;

    tracing::info!(
        path = %path.display(),
        services = catalog.list_services().len(),
        partners = catalog.list_partners().len(),
        users = directory.list_users().len(),
        "catalog loaded"
    );
    Ok((catalog, directory))
}

async fn run(config: Config) -> Result<(), AppError> {
    let (catalog, directory) = load_catalog(&config).await?;
    let slot = open_slot(&config.backend).await?;

    let engine = WashflowEngine::open(
        catalog,
        directory,
        slot,
        Arc::new(UuidIdGenerator),
        Arc::new(SystemClock),
    )
    .await;
    let app = washflow_api::app(AppState::new(engine));

    tracing::info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Washflow API server");

    let result = run(config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server stopped");
    }
    telemetry.shutdown();

    result?;
    Ok(())
}
