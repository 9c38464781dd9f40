use eframe::egui;
use hiding_bars::gui::HidingBarsApp;
use hiding_bars::logging;
use hiding_bars::settings::Settings;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 480.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hiding Bars",
        native_options,
        Box::new(move |_cc| Box::new(HidingBarsApp::new(&settings))),
    )
    .map_err(|e| anyhow::anyhow!("demo window failed: {e}"))
}
