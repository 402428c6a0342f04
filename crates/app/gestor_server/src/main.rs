//! Gestor de Productos API server binary.

use clap::{Parser, ValueEnum};
use gestor_api::AppState;
use gestor_api::config::ApiConfig;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Where users and products are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// PostgreSQL at `--database-url`.
    Postgres,
    /// Process memory; everything is lost on exit.
    Memory,
}

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "gestor_server", about = "Gestor de Productos API server")]
struct Args {
    /// Interface to bind; overrides the host part of `BIND_ADDR`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (0 = ephemeral); overrides the port part of `BIND_ADDR`.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/gestor_productos"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Storage backend.
    #[arg(long, value_enum, default_value_t = StoreKind::Postgres)]
    store: StoreKind,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,gestor_api=debug,gestor_core=debug,tower_http=info",
                )
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.bind_addr = bind_addr(&config.bind_addr, args.host.as_deref(), args.port);
    config.database_url = args.database_url.clone();

    info!(store = ?args.store, bind_addr = %config.bind_addr, "starting gestor_server");

    let state = match args.store {
        StoreKind::Postgres => {
            info!(max_connections = args.max_connections, "configuring connection pool");
            let pool = PgPoolOptions::new()
                .max_connections(args.max_connections)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(&config.database_url)
                .await?;

            info!("running database migrations");
            gestor_api::migrate(&pool).await?;

            AppState::postgres(pool, config.clone())
        }
        StoreKind::Memory => {
            warn!("using in-memory store; data will not survive a restart");
            AppState::in_memory(config.clone())
        }
    };

    let app = gestor_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}

/// Apply `--host` / `--port` on top of a `host:port` address.
fn bind_addr(base: &str, host: Option<&str>, port: Option<u16>) -> String {
    let (base_host, base_port) = base.rsplit_once(':').unwrap_or((base, "5000"));
    let host = host.unwrap_or(base_host);
    match port {
        Some(port) => format!("{host}:{port}"),
        None => format!("{host}:{base_port}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn memory_store_can_be_selected() {
        let args = Args::try_parse_from(["gestor_server", "--store", "memory", "--port", "0"])
            .unwrap();
        assert_eq!(args.store, StoreKind::Memory);
        assert_eq!(args.port, Some(0));
    }

    #[test]
    fn host_and_port_override_bind_addr() {
        assert_eq!(bind_addr("127.0.0.1:5000", None, None), "127.0.0.1:5000");
        assert_eq!(bind_addr("127.0.0.1:5000", Some("0.0.0.0"), None), "0.0.0.0:5000");
        assert_eq!(bind_addr("127.0.0.1:5000", None, Some(8080)), "127.0.0.1:8080");
        assert_eq!(bind_addr("localhost", None, None), "localhost:5000");
    }
}
