mod app;
mod settings;

use app::MathSmashApp;
use eframe::egui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let settings = settings::load_or_default();
    tracing::info!(?settings, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 640.0])
            .with_min_inner_size([350.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Math Smash",
        options,
        Box::new(move |cc| Ok(Box::new(MathSmashApp::new(cc, settings)))),
    )
}
