use color_eyre::eyre::Context;
use dnc_uploader::{
    adapters::SmartleadClient, config::Config, domain::DncService, server::Server, telemetry,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // a missing .env file is fine, the environment may already be set
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let config = Config::load().wrap_err("Failed to load configuration")?;
    tracing::info!("Loaded configuration: {:?}", config);

    let platform =
        SmartleadClient::new(&config.platform).wrap_err("Failed to create platform client")?;
    let service = DncService::new(platform, config.platform.redirect_url.clone());

    let server = Server::new(service, &config.server).await?;
    server.run().await
}
