//! lumina-live-web: browser bindings for `lumina-live-core`.
//!
//! Implements the core's collaborator traits on top of web APIs:
//!
//! - [`HtmlVideoSink`] - `HTMLVideoElement` as a `MediaSink`
//! - [`HlsJsFactory`]/[`HlsJsEngine`] - hls.js as the compatibility engine
//! - [`FetchFrameSubmitter`] - frame submission via `fetch`
//! - [`PointerTracker`] - window `pointermove` listener for hover reveal
//! - [`WebPlayerHost`] - owns all of the above and pumps their events
//!
//! Everything here only exists on `wasm32`. hls.js must be loaded on the page
//! as `window.Hls` for the compatibility path to be available.
//!
//! ```ignore
//! let mut host = WebPlayerHost::mount(
//!     PlayerConfig::default().with_plus(true),
//!     video_element,
//!     "/vod/front/index.m3u8",
//!     Some(("/api".into(), "front".into())),
//! )?;
//!
//! // requestAnimationFrame loop:
//! host.refresh_video_bounds();
//! host.update();
//! ```

#[cfg(target_arch = "wasm32")]
mod hls;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod pointer;
#[cfg(target_arch = "wasm32")]
mod submit;
#[cfg(target_arch = "wasm32")]
mod video_sink;

#[cfg(target_arch = "wasm32")]
pub use hls::{EngineEventQueue, HlsJsEngine, HlsJsFactory};
#[cfg(target_arch = "wasm32")]
pub use host::{detect_platform, element_fullscreen, now, WebPlayerHost, WebStreamPlayer};
#[cfg(target_arch = "wasm32")]
pub use pointer::PointerTracker;
#[cfg(target_arch = "wasm32")]
pub use submit::FetchFrameSubmitter;
#[cfg(target_arch = "wasm32")]
pub use video_sink::HtmlVideoSink;

pub use lumina_live_core;
