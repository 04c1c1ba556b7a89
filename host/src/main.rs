use clap::Parser;
use fwx_core::App;
use fwx_host::{demo, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::parse();
    let gateway = App::with_config(demo::routes(), settings.app_config());
    let listener = TcpListener::bind(settings.bind_addr()?).await?;
    fwx_host::run(listener, gateway).await?;
    Ok(())
}
