//! Multipart upload over `XMLHttpRequest`
//!
//! `fetch` has no upload progress, so the request goes through XHR. The load
//! and error callbacks settle a promise that the transport awaits; progress
//! events are forwarded to the controller's sink as they arrive.

use js_sys::{Function, Promise};
use resume_core::{HttpReply, ProgressSink, TransportError, UploadRequest, UploadTransport};
use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, FormData, ProgressEvent, XmlHttpRequest};

/// Browser transport posting a `File` as multipart form data
#[derive(Debug, Default, Clone, Copy)]
pub struct XhrTransport;

impl UploadTransport for XhrTransport {
    type Payload = File;

    fn post(
        &self,
        request: UploadRequest<File>,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        async move {
            send(request, progress)
                .await
                .map_err(|e| TransportError::new(describe_js_error(&e)))
        }
    }
}

/// Callbacks attached to one request; detached before they are dropped
struct XhrHandlers {
    on_settle: Closure<dyn FnMut(Event)>,
    on_fail: Closure<dyn FnMut(Event)>,
    on_progress: Closure<dyn FnMut(ProgressEvent)>,
}

impl XhrHandlers {
    fn attach(
        xhr: &XmlHttpRequest,
        resolve: Function,
        reject: Function,
        progress: ProgressSink,
    ) -> Result<Self, JsValue> {
        let on_settle = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_fail = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let _ = reject.call1(
                &JsValue::NULL,
                &JsValue::from_str(&format!("request {}", event.type_())),
            );
        });
        let on_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            let total = event.length_computable().then(|| event.total());
            progress.report(event.loaded(), total);
        });

        xhr.set_onload(Some(on_settle.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_fail.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_fail.as_ref().unchecked_ref()));
        xhr.set_ontimeout(Some(on_fail.as_ref().unchecked_ref()));
        xhr.upload()?
            .set_onprogress(Some(on_progress.as_ref().unchecked_ref()));

        Ok(Self {
            on_settle,
            on_fail,
            on_progress,
        })
    }

    fn detach(self, xhr: &XmlHttpRequest) {
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        xhr.set_ontimeout(None);
        if let Ok(upload) = xhr.upload() {
            upload.set_onprogress(None);
        }
        let Self {
            on_settle,
            on_fail,
            on_progress,
        } = self;
        drop((on_settle, on_fail, on_progress));
    }
}

async fn send(request: UploadRequest<File>, progress: ProgressSink) -> Result<HttpReply, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(
        &request.field_name,
        &request.file.payload,
        &request.file.name,
    )?;

    let xhr = XmlHttpRequest::new()?;
    xhr.open("POST", &request.endpoint)?;

    // The executor runs synchronously, so both functions are captured here
    let mut settle = None;
    let promise = Promise::new(&mut |resolve, reject| settle = Some((resolve, reject)));
    let (resolve, reject) =
        settle.ok_or_else(|| JsValue::from_str("Promise executor did not run"))?;

    let handlers = XhrHandlers::attach(&xhr, resolve, reject, progress)?;
    if let Err(e) = xhr.send_with_opt_form_data(Some(&form)) {
        handlers.detach(&xhr);
        return Err(e);
    }

    let settled = JsFuture::from(promise).await;
    handlers.detach(&xhr);
    settled?;

    Ok(HttpReply {
        status: xhr.status()?,
        body: xhr.response_text()?.unwrap_or_default(),
    })
}

/// Best-effort text for a rejected JS value
pub fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
