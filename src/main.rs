use tracing_subscriber::EnvFilter;
use videohub::ui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("videohub=info")),
        )
        .init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 760.0])
        .with_min_inner_size([1100.0, 620.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "VideoHub",
        native_options,
        Box::new(|cc| Ok(Box::new(ui::AppState::new(cc)))),
    )
}
