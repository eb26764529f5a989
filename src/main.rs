mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use app::NameTrendsApp;
use config::AppConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::resolve()?;
    log::info!("Using source {:?}", config.source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Name Trends – Birth Name Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(NameTrendsApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
