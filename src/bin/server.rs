//! Lookup service binary.
//!
//! Reads configuration (API keys, scanner command, bind address) from the
//! environment and serves the HTTP boundary until killed.

use footprint::config::LookupConfig;

#[tokio::main]
async fn main() -> footprint::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let addr =
        std::env::var("FOOTPRINT_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_owned());
    let config = LookupConfig::from_env();

    footprint::server::run(&addr, config).await.map_err(|e| {
        tracing::error!(error = %e, "server exited with error");
        e
    })
}
