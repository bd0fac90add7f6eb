use std::sync::Arc;

mod assets;
mod config;
mod handler;
mod http;
mod logger;
mod relay;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Startup order: assets, relay pin, listener. Any failure here is
    // fatal; log it and bail so the failure is visible in the error log.
    let assets = match assets::StaticAssets::load(&cfg.assets).await {
        Ok(a) => a,
        Err(e) => {
            logger::log_error(&format!("Failed to load static assets: {e}"));
            return Err(e.into());
        }
    };

    let relay = match relay::Relay::open(&cfg.relay) {
        Ok(r) => r,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to acquire relay pin {}: {e}",
                cfg.relay.pin
            ));
            return Err(e);
        }
    };

    let listener = match server::create_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_error(&format!("Failed to bind {addr}: {e}"));
            return Err(e.into());
        }
    };

    let signals = Arc::new(server::signal::SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, assets, relay));
    server::serve(listener, state, signals).await
}
