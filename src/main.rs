//! Blink Time - A blink reminder that plays an audible cue at a steady rate
//!
//! This is the main entry point for the blink-time daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use blink_time::{
    api::create_router,
    config::Config,
    services::RodioCuePlayer,
    state::AppState,
    utils::{listen_for_control_signals, shutdown_signal},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("blink_time={},tower_http=info", config.log_level()))
        .init();

    info!("Starting blink-time v{}", env!("CARGO_PKG_VERSION"));
    let sound = config.cue_sound();
    info!("Configuration: host={}, port={}, rate={}, volume={}, sound={}",
          config.host, config.port, config.rate, config.volume, sound);

    if !sound.is_present() {
        tracing::warn!("Cue sound {} not found, cues will be silent", sound);
    }

    let player = Arc::new(RodioCuePlayer::new(sound)?);
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        player,
        config.rate,
        config.volume,
    ));

    if config.autostart {
        state.start(None).map_err(anyhow::Error::msg)?;
    }

    let control_signals = listen_for_control_signals(Arc::clone(&state))?;

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start   - Start blinking (optional {{\"rate\": 15|20}})");
    info!("  POST /stop    - Stop blinking");
    info!("  POST /toggle  - Start/stop button");
    info!("  PUT  /rate    - Select blink rate");
    info!("  PUT  /volume  - Set cue volume");
    info!("  POST /cue     - Play the cue once");
    info!("  GET  /status  - Check reminder status");
    info!("  GET  /help    - Describe the controls");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    control_signals.close().await;
    if let Err(e) = state.stop() {
        tracing::error!("Failed to stop reminder: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
