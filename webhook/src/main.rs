use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

use completion_client::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use webhook::Processor;

#[derive(Parser)]
struct Args {
    #[clap(short, long, default_value = "127.0.0.1:8080")]
    address: String,
    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    openai_base_url: String,
    #[clap(short, long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    tracing::info!(
        "Starting webhook with model [{}] at [{}]",
        args.model,
        args.openai_base_url
    );

    let client = OpenAiClient::new(args.openai_api_key, &args.openai_base_url, &args.model);
    if !client.has_credential() {
        tracing::warn!("OPENAI_API_KEY is not set, every question will be answered with 500");
    }
    let app = webhook::app(Processor::new(Arc::new(client)));

    tracing::info!("Listening on {}", &args.address);
    let listener = TcpListener::bind(&args.address).await?;

    axum::serve(listener, app).await?;
    tracing::info!("Server shutdown");

    Ok(())
}
