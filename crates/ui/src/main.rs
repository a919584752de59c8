use anyhow::Context;
use eeg_cloud_core::config::AppConfig;
use eeg_cloud_ui::{EegCloudApp, logging};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading EEG_CLOUD_CONFIG")?;
    logging::init(config.log_level().unwrap_or(log::LevelFilter::Info));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EEG Cloud")
            .with_inner_size([1100.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "EEG Cloud",
        options,
        Box::new(|cc| Ok(Box::new(EegCloudApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
