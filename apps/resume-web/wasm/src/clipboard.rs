//! System clipboard access and copy-button feedback

use js_sys::{Function, Promise, Reflect};
use resume_core::CopyLabels;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

/// Write `text` with `navigator.clipboard.writeText`
pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let navigator = window.navigator();

    let clipboard = Reflect::get(&navigator, &"clipboard".into())?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("Clipboard API not available"));
    }

    let write: Function = Reflect::get(&clipboard, &"writeText".into())?.dyn_into()?;
    let promise: Promise = write
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into()?;
    JsFuture::from(promise).await?;

    Ok(())
}

/// Show the confirmation label, then restore the idle markup after the
/// feedback window
pub fn flash_confirmation(
    button: &HtmlElement,
    labels: &CopyLabels,
    feedback_ms: i32,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    button.set_text_content(Some(&labels.confirmation));

    let button = button.clone();
    let idle = labels.idle.clone();
    let restore = Closure::once_into_js(move || button.set_inner_html(&idle));
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        restore.unchecked_ref(),
        feedback_ms,
    )?;

    Ok(())
}
