//! Frame submission over `fetch`.

use lumina_live_core::{FrameSubmitter, PlayerError, SubmitResponse};
use poll_promise::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// POSTs to `{base_url}/{camera}/plus/{time}` for each submitted frame.
#[derive(Debug, Clone)]
pub struct FetchFrameSubmitter {
    base_url: String,
    camera: String,
}

impl FetchFrameSubmitter {
    pub fn new(base_url: impl Into<String>, camera: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            camera: camera.into(),
        }
    }

    /// Endpoint for the frame at `time_secs`.
    pub fn url_for(&self, time_secs: f64) -> String {
        format!(
            "{}/{}/plus/{}",
            self.base_url.trim_end_matches('/'),
            self.camera,
            time_secs
        )
    }
}

impl FrameSubmitter for FetchFrameSubmitter {
    fn submit(&self, time_secs: f64) -> Promise<Result<SubmitResponse, PlayerError>> {
        let url = self.url_for(time_secs);
        tracing::debug!("Submitting frame: POST {}", url);
        Promise::spawn_local(post(url))
    }
}

async fn post(url: String) -> Result<SubmitResponse, PlayerError> {
    let failed = |e: wasm_bindgen::JsValue| PlayerError::SubmitFailed(format!("{:?}", e));

    let window = web_sys::window()
        .ok_or_else(|| PlayerError::SubmitFailed("No window available".to_string()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    let request = Request::new_with_str_and_init(&url, &init).map_err(failed)?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(failed)?;
    let response: Response = value.dyn_into().map_err(failed)?;

    Ok(SubmitResponse::new(response.status()))
}
