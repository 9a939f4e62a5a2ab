/// Browser side of the popup: fetch transport and chrome.* bridge

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, RequestMode, Response};

use crate::client::{FetchError, HttpResponse, Transport};
use crate::controller::{HostError, TabHost, VideoMessage};
use crate::lifetime::PopupLifetime;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    fn addVideoIdListener(callback: &js_sys::Function);

    fn removeVideoIdListener(callback: &js_sys::Function);
}

fn js_error(context: &str, e: JsValue) -> FetchError {
    FetchError::Transport(format!("{}: {:?}", context, e))
}

/// `window.fetch`, aborted through an `AbortController` when the popup closes
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn get(&self, url: &str, lifetime: &PopupLifetime) -> Result<HttpResponse, FetchError> {
        let window = web_sys::window().ok_or_else(|| FetchError::Transport("no window".to_string()))?;

        let controller = AbortController::new().map_err(|e| js_error("Failed to create abort controller", e))?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::Cors);
        init.set_signal(Some(&controller.signal()));

        let request = Request::new_with_str_and_init(url, &init)
            .map_err(|e| js_error("Failed to build request", e))?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(|e| js_error("Failed to set headers", e))?;

        let _abort = lifetime.on_close(move || controller.abort());

        let response = match JsFuture::from(window.fetch_with_request(&request)).await {
            Ok(response) => response,
            Err(_) if lifetime.is_closed() => return Err(FetchError::Cancelled),
            Err(e) => return Err(js_error("Request failed", e)),
        };
        let response: Response = response
            .dyn_into()
            .map_err(|e| js_error("Unexpected fetch result", e))?;
        let status = response.status();

        let text = response.text().map_err(|e| js_error("Failed to read body", e))?;
        let body = match JsFuture::from(text).await {
            Ok(body) => body.as_string().unwrap_or_default(),
            Err(_) if lifetime.is_closed() => return Err(FetchError::Cancelled),
            Err(e) => return Err(js_error("Failed to read body", e)),
        };

        Ok(HttpResponse { status, body })
    }
}

/// Active tab lookup through `chrome.tabs.query`
pub struct ChromeTabHost;

impl TabHost for ChromeTabHost {
    async fn active_tab_url(&self) -> Result<Option<String>, HostError> {
        let url = getActiveTabUrl()
            .await
            .map_err(|e| HostError::TabQuery(format!("{:?}", e)))?;
        Ok(url.as_string())
    }
}

/// Registered `{ vid }` runtime message listener; removed on drop
pub struct VideoIdListener {
    callback: Closure<dyn FnMut(JsValue)>,
}

pub fn listen_for_video_ids(mut handler: impl FnMut(VideoMessage) + 'static) -> VideoIdListener {
    let callback = Closure::wrap(Box::new(move |message: JsValue| {
        match serde_wasm_bindgen::from_value::<VideoMessage>(message) {
            Ok(message) => handler(message),
            Err(e) => log::debug!("Ignoring runtime message: {:?}", e),
        }
    }) as Box<dyn FnMut(JsValue)>);

    addVideoIdListener(callback.as_ref().unchecked_ref());
    VideoIdListener { callback }
}

impl Drop for VideoIdListener {
    fn drop(&mut self) {
        removeVideoIdListener(self.callback.as_ref().unchecked_ref());
    }
}
