use second_shortest::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut config = ServerConfig::default();
    if let Some(port) = args.get(1) {
        match port.parse() {
            Ok(port) => config.port = port,
            Err(_) => log::warn!("Ignoring invalid port {:?}, using {}", port, config.port),
        }
    }
    if let Some(dir) = args.get(2) {
        config.static_dir = dir.clone();
    }

    log::info!(
        "Configuration: port={}, static_dir={}, cors={}, max_sessions={}",
        config.port,
        config.static_dir,
        config.enable_cors,
        config.max_sessions
    );

    start_server_with_config(config).await
}
