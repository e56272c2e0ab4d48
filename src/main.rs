use evcc2vehicle::{Config, EvccApi};
use log::{error, info};
use std::time::Duration;


#[tokio::main]
async fn main() {
    // Initialize logging
    let default_filter = std::env::var("EVCC_LOG_LEVEL").unwrap_or("info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!("Using EVCC at {}", config.evcc.base_url);
    let api = EvccApi::with_log(&config.evcc.base_url, |msg| println!("{msg}"))
        .with_timeout(Duration::from_secs(config.evcc.timeout));

    let vehicle = api.get_intelligent_vehicle().await;
    match serde_json::to_string_pretty(&vehicle) {
        Ok(json) => println!("Vehicle info from EVCC: {json}"),
        Err(e) => error!("Unable to serialize vehicle info: {e}"),
    }

    let sessions = api.fetch_charge_sessions().await;
    match serde_json::to_string_pretty(&sessions) {
        Ok(json) => println!("Charge sessions from EVCC: {json}"),
        Err(e) => error!("Unable to serialize charge sessions: {e}"),
    }
}
