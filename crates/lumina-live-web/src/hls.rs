//! hls.js compatibility engine.
//!
//! Used when the browser cannot seek HLS natively (or cannot play it at all).
//! hls.js is reached through a small JS bridge; its error events are queued as
//! [`EngineEvent`]s for the host to forward to the player.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use lumina_live_core::{
    CompatibilityEngine, EngineErrorKind, EngineEvent, EngineFactory, PlayerError,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

use crate::video_sink::HtmlVideoSink;

/// Engine events shared between the factory, its engines and the host.
pub type EngineEventQueue = Rc<RefCell<VecDeque<EngineEvent>>>;

/// Builds [`HlsJsEngine`]s that all report into one event queue.
#[derive(Clone, Default)]
pub struct HlsJsFactory {
    events: EngineEventQueue,
}

impl HlsJsFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the event queue. Keep it before moving the factory into a player.
    pub fn events(&self) -> EngineEventQueue {
        Rc::clone(&self.events)
    }
}

impl EngineFactory<HtmlVideoSink> for HlsJsFactory {
    type Engine = HlsJsEngine;

    fn is_supported(&self) -> bool {
        js_is_hls_supported()
    }

    fn create(&self) -> Result<HlsJsEngine, PlayerError> {
        let queue = Rc::clone(&self.events);
        let on_error = Closure::new(move |data: JsValue| {
            queue.borrow_mut().push_back(parse_error_event(&data));
        });

        let hls = js_create_hls(on_error.as_ref().unchecked_ref())
            .map_err(|e| PlayerError::EngineInit(format!("hls.js initialization failed: {:?}", e)))?;

        tracing::debug!("Created hls.js instance");
        Ok(HlsJsEngine {
            hls,
            _on_error: on_error,
            destroyed: false,
        })
    }
}

/// One hls.js instance bound to one video element.
pub struct HlsJsEngine {
    hls: JsValue,
    /// Kept alive for as long as hls.js may call it
    _on_error: Closure<dyn FnMut(JsValue)>,
    destroyed: bool,
}

impl CompatibilityEngine<HtmlVideoSink> for HlsJsEngine {
    fn attach_media(&mut self, sink: &mut HtmlVideoSink) -> Result<(), PlayerError> {
        js_attach_media(&self.hls, sink.element())
            .map_err(|e| PlayerError::EngineInit(format!("hls.js attachMedia failed: {:?}", e)))
    }

    fn load_source(&mut self, url: &str) {
        if let Err(e) = js_load_source(&self.hls, url) {
            tracing::warn!("hls.js loadSource failed for {}: {:?}", url, e);
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        js_destroy_hls(&self.hls);
        tracing::debug!("Destroyed hls.js instance");
    }
}

impl Drop for HlsJsEngine {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Maps an hls.js `Hls.Events.ERROR` payload (`{ type, details, fatal }`).
fn parse_error_event(data: &JsValue) -> EngineEvent {
    let field = |name: &str| js_sys::Reflect::get(data, &name.into()).ok();

    let kind = match field("type").and_then(|v| v.as_string()).as_deref() {
        Some("networkError") => EngineErrorKind::Network,
        Some("mediaError") => EngineErrorKind::Media,
        _ => EngineErrorKind::Other,
    };
    let details = field("details")
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "unknown".to_string());
    let fatal = field("fatal").and_then(|v| v.as_bool()).unwrap_or(false);

    if fatal {
        EngineEvent::Fatal { kind, details }
    } else {
        EngineEvent::Recoverable { kind, details }
    }
}

#[wasm_bindgen(module = "/web/live-bridge.js")]
extern "C" {
    /// `Hls.isSupported()`, false when hls.js is not loaded.
    #[wasm_bindgen(js_name = "isHlsSupported")]
    fn js_is_hls_supported() -> bool;

    /// Creates an Hls instance with `onError` subscribed to its error events.
    #[wasm_bindgen(catch, js_name = "createHls")]
    fn js_create_hls(on_error: &js_sys::Function) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = "attachMedia")]
    fn js_attach_media(hls: &JsValue, video: &HtmlVideoElement) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = "loadSource")]
    fn js_load_source(hls: &JsValue, url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "destroyHls")]
    fn js_destroy_hls(hls: &JsValue);
}
