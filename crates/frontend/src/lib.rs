pub mod app;
pub mod dashboards;
pub mod domain;
pub mod shared;

use shared::config::{load_config, page_override, ClientConfig};
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // a broken page override must not stop the client
    let (config, config_error) = match load_config(page_override().as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e)),
    };

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.logging.level());
    console_error_panic_hook::set_once();

    if let Some(e) = config_error {
        log::error!("invalid client config, using defaults: {:#}", e);
    }
    log::info!("booking client started, api base '{}'", config.api.base_path);
}
