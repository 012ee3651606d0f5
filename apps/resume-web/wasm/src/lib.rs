//! WASM bindings for the resume analysis page
//!
//! All behaviour lives in `resume-core`; this crate binds it to the DOM.
//!
//! ## Architecture
//!
//! - `ResumeApp` owns the listeners and the upload controller
//! - `XhrTransport` posts the file and reports upload progress
//! - `WebObserver` applies status changes and rendered results to the page
//! - JavaScript only loads the module and constructs the app
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ResumeApp } from './pkg/resume_wasm.js';
//!
//! await init();
//! const app = new ResumeApp(JSON.stringify({ endpoint: '/api/process' }));
//! document.getElementById('closeError').onclick = () => app.dismissError();
//! ```

pub mod app;
pub mod clipboard;
pub mod dom;
pub mod logging;
pub mod transport;

use resume_core::{file_label, parse_envelope, render, ClientConfig, ResultView, UploadError};
use wasm_bindgen::prelude::*;

pub use app::ResumeApp;
pub use transport::XhrTransport;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Label shown for a selected file, e.g. `resume.pdf • 42 KB`
#[wasm_bindgen(js_name = formatFileLabel)]
pub fn format_file_label(name: &str, size_bytes: f64) -> String {
    file_label(name, size_bytes.max(0.0) as u64)
}

/// Render a success body without touching the page
///
/// Useful for previews and tests; uses the default skill limit.
#[wasm_bindgen(js_name = renderResultJson)]
pub fn render_result_json(body: &str) -> Result<JsValue, JsValue> {
    let view = view_from_body(body).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&view)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn view_from_body(body: &str) -> Result<ResultView, UploadError> {
    let envelope = parse_envelope(body)?;
    Ok(render(
        &envelope.result,
        &envelope.downloads,
        ClientConfig::default().max_skills,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_file_label() {
        assert_eq!(format_file_label("cv.pdf", 43_520.0), "cv.pdf • 43 KB");
        assert_eq!(format_file_label("empty.pdf", 0.0), "empty.pdf • 0 KB");
        assert_eq!(format_file_label("odd.pdf", -5.0), "odd.pdf • 0 KB");
    }

    #[test]
    fn test_version_matches_package() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_view_from_body() {
        let view = view_from_body(
            r#"{"result":{"name":"ada lovelace","score":91.2,"top_skills":["math"]},
                "downloads":{"json":"/r.json","csv":"/r.csv"}}"#,
        )
        .unwrap();

        assert_eq!(view.name, "Ada Lovelace");
        assert_eq!(view.gauge.label, "91%");
        assert_eq!(view.skills, vec!["math".to_string()]);
        assert_eq!(view.downloads.csv, "/r.csv");
    }

    #[test]
    fn test_view_from_bad_body() {
        let err = view_from_body("<html>oops</html>").unwrap_err();
        assert_eq!(err.to_string(), "Invalid server response");
    }
}
