mod api;
mod components;
pub mod config;
mod pages;
mod router;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

pub use router::app_root;

/// Browser entry point. Does nothing on the host, where only tests run.
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn run() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&format!("logger already set: {}", err).into());
        }
        log::info!("Starting library frontend");

        // window.__LIBRARY_ENV wins over ./config.json; loading does not block mount.
        leptos::spawn_local(async move {
            config::init().await;
        });

        router::mount_app();
    }
}
