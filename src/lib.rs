/// Emotional YouTube - Chrome Extension for video comment sentiment reports
/// Built with Rust + WASM + Yew

pub mod client;
pub mod config;
pub mod controller;
pub mod lifetime;
pub mod render;
pub mod report;
pub mod video_id;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
pub mod ui;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Exposed for the background script, which messages the id to the popup
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn extract_video_id(url: &str) -> Option<String> {
    video_id::extract_video_id(url).map(String::from)
}

// Start the Yew app for the popup
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
