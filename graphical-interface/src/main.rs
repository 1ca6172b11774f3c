use graphical_interface::{config::MapConfig, run};
use logger::Logger;

fn main() {
    let mut config = MapConfig::from_env();
    if let Some(data_path) = std::env::args().nth(1) {
        config = config.with_data_path(data_path);
    }

    let logger = match Logger::new(&config.log_dir, "quake-map") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Logging to console only: {}", e);
            Logger::console_only()
        }
    }
    .with_level(config.log_level);

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        let _ = logger.warn("A TLS crypto provider was already installed");
    }

    if let Err(e) = run(config, logger.clone()) {
        let _ = logger.error(&e.to_string());
        std::process::exit(1);
    }
}
