// src/main.rs
mod api;
mod config;
mod error;
mod handler;
mod models;
mod predictor;
mod view;

use crate::config::Config;
use crate::predictor::ArtifactPredictor;
use env_logger::{Builder, Env};
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let config = Config::from_env()?;
    info!("Starting the stock price predictor...");

    if !config.model_path.exists() {
        warn!(
            "Model artifact {} not found; predictions will fail until it is in place",
            config.model_path.display()
        );
    }
    let predictor = Arc::new(ArtifactPredictor::new(config.model_path.clone()));

    let api = api::routes(predictor);

    info!("Server running on http://{}", config.bind_addr);
    warp::serve(api).run(config.bind_addr).await;
    Ok(())
}
