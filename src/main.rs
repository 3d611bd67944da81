mod app;
mod config;
mod decode;
mod dialogs;
mod error;
mod preview;
mod processing;
mod session;
mod state;
mod theme;

use app::TouchupApp;
use config::AppConfig;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load();
    let width = config.window_width.unwrap_or(1000.0);
    let height = config.window_height.unwrap_or(700.0);
    tracing::info!(theme = config.theme.label(), "starting touchup");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Interactive Image Editor")
            .with_app_id("touchup")
            .with_drag_and_drop(true)
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "touchup",
        native_options,
        Box::new(|cc| Ok(Box::new(TouchupApp::new(cc, config)))),
    )
}
