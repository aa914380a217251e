//! # HTTP Origin Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada: inicializa el logging, lee la configuración del
//! CLI/entorno y arranca el servidor.

use http_origin::config::Config;
use http_origin::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_origin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("http_origin v{} starting", env!("CARGO_PKG_VERSION"));

    // Crear configuración (CLI o variables de entorno)
    let config = Config::new();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }

    config.print_summary();

    let server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "Fatal server error");
        std::process::exit(1);
    }
}
