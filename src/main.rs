fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1040.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Playboard",
        native_options,
        Box::new(|cc| Ok(Box::new(playboard::app::BoardApp::new(cc)))),
    )
}
