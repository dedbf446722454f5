//! Regionview WASM - WebAssembly bindings for Regionview
//!
//! This crate exposes the regionview-core region handling to JavaScript
//! viewers. The host keeps drawing the image and region elements; this crate
//! owns the region list, the gesture state and the coordinate math.
//!
//! # Module Structure
//!
//! - `viewer` - the `JsRegionViewer` binding driving region gestures
//! - `types` - JavaScript-compatible rectangle and view state structures
//! - `logging` - forwarding of log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRegionViewer } from '@regionview/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const viewer = new JsRegionViewer(location.search);
//! viewer.set_view({ scaler_rect: { x: 0, y: 0, width: 800, height: 600 } });
//! for (const region of viewer.render()) {
//!   console.log(region.number, region.screen_rect);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod logging;
mod types;
mod viewer;

// Re-export public types
pub use logging::set_log_level;
pub use types::{JsRect, JsViewState};
pub use viewer::{JsRegionViewer, JsRemoval, ViewerError};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(logging::default_level());
    log::debug!("Regionview WASM {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
