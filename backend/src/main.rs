//! Backend entry-point: loads configuration, prepares the store and serves the
//! clinic REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use petclinic::inbound::http::health::HealthState;
use petclinic::outbound::enhancer::OpenAiDescriptionEnhancer;
use petclinic::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use petclinic::settings::{ServerSettings, StoreKind};
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let config = build_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, "server listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server stopped with an error")
}

async fn build_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if settings.store()? == StoreKind::Postgres {
        let database_url = settings.database_url()?.to_owned();
        let migration_url = database_url.clone();
        web::block(move || run_pending_migrations(&migration_url))
            .await
            .wrap_err("migration task failed")??;
        let pool = DbPool::new(PoolConfig::new(database_url)).await?;
        config = config.with_db_pool(pool);
    }

    match settings.enhancer()? {
        Some(enhancer) => {
            info!(endpoint = %enhancer.endpoint, "description enhancer enabled");
            config = config.with_enhancer(Arc::new(OpenAiDescriptionEnhancer::new(enhancer)?));
        }
        None => info!("description enhancer disabled; descriptions stored as submitted"),
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics()?);

    Ok(config)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("petclinic")
        .endpoint("/metrics")
        .build()
        .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))
}
