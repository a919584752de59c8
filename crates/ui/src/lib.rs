mod app;
pub mod logging;
mod pages;
mod renderer;
mod theme;

pub use app::EegCloudApp;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = eeg_cloud_core::config::AppConfig::default();
    logging::init(config.log_level().unwrap_or(log::LevelFilter::Info));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id("eeg_cloud_canvas")
        .ok_or_else(|| JsValue::from_str("no canvas element with id 'eeg_cloud_canvas'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("element is not a canvas"))?;

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async move {
        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(EegCloudApp::new(cc, config)))),
            )
            .await;
        if let Err(e) = start_result {
            log::error!("failed to start eframe: {e:?}");
        }
    });
    Ok(())
}
