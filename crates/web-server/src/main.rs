use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to read the listener address and hand off to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = configuration::load_config()?;
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    web_server::run_server(addr).await
}
