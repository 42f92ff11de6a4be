use std::sync::Arc;

use anyhow::Result;
use checkout_proxy::config::loader;
use checkout_proxy::config::service::{EnvInputs, ServiceConfig};
use checkout_proxy::receipts::LogReceiptSender;
use checkout_proxy::server;
use checkout_proxy::utils::logging::{self, LogLevel};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// optional YAML settings file
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[arg(long, env = "HOST")]
    host: Option<String>,
    #[arg(long, env = "PORT")]
    port: Option<u16>,
    /// sandbox | live
    #[arg(long, env = "ENVIRONMENT", default_value = "sandbox")]
    environment: String,
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
    #[arg(long, env = "PAYPAL_CLIENT_ID", hide_env_values = true)]
    paypal_client_id: Option<String>,
    #[arg(long, env = "PAYPAL_MERCHANT_ID", hide_env_values = true)]
    paypal_merchant_id: Option<String>,
    #[arg(long, env = "PAYPAL_CLIENT_SECRET", hide_env_values = true)]
    paypal_client_secret: Option<String>,
    #[arg(long, env = "NODE_ENV")]
    node_env: Option<String>,
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,
}

impl From<Args> for EnvInputs {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            environment: Some(args.environment),
            client_id: args.client_id,
            client_secret: args.client_secret,
            paypal_client_id: args.paypal_client_id,
            paypal_merchant_id: args.paypal_merchant_id,
            paypal_client_secret: args.paypal_client_secret,
            node_env: args.node_env,
            base_url: args.base_url,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read .env and arguments
    // -------------------------------

    dotenvy::dotenv().ok();
    let mut args = Args::parse();

    // -------------------------------
    // 2. Load settings, start logging
    // -------------------------------

    let config_path = args.config.take();
    let settings = loader::run(config_path.as_deref()).await?;
    logging::run(&settings, args.log_level)?;

    // -------------------------------
    // 3. Assemble immutable service config
    // -------------------------------

    let service_config = ServiceConfig::assemble(settings, EnvInputs::from(args));
    info!(
        "environment: {}, endpoint: {}, direct credentials: {}, checkout credentials: {:?}",
        service_config.environment.as_str(),
        service_config.endpoint(),
        service_config.direct.is_some(),
        service_config.checkout,
    );

    // -------------------------------
    // 4. Serve
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config, Arc::new(LogReceiptSender)).await
}
