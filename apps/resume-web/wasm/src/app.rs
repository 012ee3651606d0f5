//! The page controller exposed to JavaScript
//!
//! `ResumeApp` resolves every element, wires the listeners and owns their
//! closures. Dropping it (or calling `free()` from JS) removes the listeners.

use crate::clipboard::{flash_confirmation, write_text};
use crate::dom::{element_by_id, ResultPanel, StatusPanel, WebObserver};
use crate::transport::XhrTransport;
use resume_core::{
    ClientConfig, ClipboardExporter, CopyLabels, DragEventKind, DropZone, FileSelector,
    PendingFile, UploadController, UploadObserver,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DragEvent, Element, Event, EventTarget, File, FileList, HtmlElement,
    HtmlInputElement,
};

const DRAG_OVER: &str = "drag-over";

/// An event listener that is removed when dropped
struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        event_type: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
    }
}

/// State reachable from the listeners
struct Shared {
    controller: UploadController<XhrTransport>,
    observer: Rc<WebObserver>,
    selector: RefCell<FileSelector<File>>,
    drop_zone: RefCell<DropZone>,
    exporter: Rc<RefCell<ClipboardExporter>>,
    drop_zone_el: Element,
    file_name: Element,
    file_input: HtmlInputElement,
    copy_button: HtmlElement,
}

impl Shared {
    fn select(&self, files: Option<FileList>) {
        let Some(files) = files else {
            return;
        };
        let pending = (0..files.length())
            .filter_map(|i| files.get(i))
            .map(|file| {
                let size = file.size() as u64;
                PendingFile::new(file.name(), size, file)
            });
        if let Some(label) = self.selector.borrow_mut().select_first(pending) {
            self.file_name.set_text_content(Some(&label));
        }
    }

    fn drag(&self, event: &Event) {
        let Some(kind) = DragEventKind::from_event_type(&event.type_()) else {
            return;
        };
        event.prevent_default();
        let highlight = self.drop_zone.borrow_mut().apply(kind);
        if let Err(e) = self
            .drop_zone_el
            .class_list()
            .toggle_with_force(DRAG_OVER, highlight)
        {
            tracing::error!(error = ?e, "failed to toggle drop highlight");
        }

        if kind == DragEventKind::Drop {
            let files = event
                .dyn_ref::<DragEvent>()
                .and_then(|e| e.data_transfer())
                .and_then(|dt| dt.files());
            self.select(files);
        }
    }

    async fn upload(self: Rc<Self>) {
        // Snapshot first; the selector borrow must not live across the await
        let file = self.selector.borrow().snapshot();
        if let Err(e) = self.controller.start(file).await {
            tracing::debug!(%e, "upload attempt ended without a result");
        }
    }

    async fn copy(self: Rc<Self>) {
        let (payload, labels, feedback_ms) = {
            let exporter = self.exporter.borrow();
            let Some(payload) = exporter.payload() else {
                return;
            };
            (
                payload.to_string(),
                exporter.labels().clone(),
                exporter.feedback_ms(),
            )
        };

        let result = match write_text(&payload).await {
            Ok(()) => flash_confirmation(&self.copy_button, &labels, feedback_ms),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::error!(error = ?e, "copy to clipboard failed");
        }
    }
}

/// Browser client for the resume analysis page
#[wasm_bindgen]
pub struct ResumeApp {
    shared: Rc<Shared>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ResumeApp {
    /// Bind to the current document. `config_json` overrides the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ResumeApp, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => ClientConfig::from_json(json),
            None => Ok(ClientConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let shared = Rc::new(Self::bind(&document, &config)?);
        let listeners = Self::listen(&shared)?;
        tracing::debug!(endpoint = %config.endpoint, "resume client ready");

        Ok(ResumeApp {
            shared,
            _listeners: listeners,
        })
    }

    /// Hide the error banner
    #[wasm_bindgen(js_name = dismissError)]
    pub fn dismiss_error(&self) -> Result<(), JsValue> {
        self.shared.observer.status().clear_error()
    }

    /// Upload state: "idle", "in-flight", "succeeded" or "failed"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.shared.controller.state().as_str().to_string()
    }

    /// Label of the pending file, if one is selected
    #[wasm_bindgen(js_name = pendingLabel)]
    pub fn pending_label(&self) -> Option<String> {
        self.shared.selector.borrow().label()
    }

    /// JSON shown in the result panel, if anything has been rendered
    #[wasm_bindgen(js_name = lastResultJson)]
    pub fn last_result_json(&self) -> Option<String> {
        self.shared.exporter.borrow().payload().map(str::to_string)
    }
}

impl ResumeApp {
    fn bind(document: &Document, config: &ClientConfig) -> Result<Shared, JsValue> {
        let ids = &config.elements;

        let copy_button: HtmlElement = element_by_id(document, &ids.copy_json)?;
        let labels = CopyLabels::new(
            copy_button.inner_html(),
            config.copied_label.clone(),
            config.copy_feedback_ms,
        );
        let exporter = Rc::new(RefCell::new(ClipboardExporter::new(labels)));

        let observer = Rc::new(WebObserver::new(
            StatusPanel::from_document(document, ids)?,
            ResultPanel::from_document(document, ids)?,
            Rc::clone(&exporter),
            config.max_skills,
        ));
        let sink: Rc<dyn UploadObserver> = observer.clone();

        Ok(Shared {
            controller: UploadController::new(XhrTransport, config, sink),
            observer,
            selector: RefCell::new(FileSelector::new()),
            drop_zone: RefCell::new(DropZone::default()),
            exporter,
            drop_zone_el: element_by_id(document, &ids.drop_zone)?,
            file_name: element_by_id(document, &ids.file_name)?,
            file_input: element_by_id(document, &ids.file_input)?,
            copy_button,
        })
    }

    fn listen(shared: &Rc<Shared>) -> Result<Vec<Listener>, JsValue> {
        let mut listeners = Vec::new();

        let zone: &EventTarget = shared.drop_zone_el.as_ref();
        for event_type in ["dragenter", "dragover", "dragleave", "drop"] {
            let s = Rc::clone(shared);
            listeners.push(Listener::new(zone, event_type, move |e: Event| s.drag(&e))?);
        }

        let s = Rc::clone(shared);
        listeners.push(Listener::new(
            shared.file_input.as_ref(),
            "change",
            move |_e: Event| s.select(s.file_input.files()),
        )?);

        let s = Rc::clone(shared);
        listeners.push(Listener::new(
            shared.observer.status().upload_button().as_ref(),
            "click",
            move |_e: Event| wasm_bindgen_futures::spawn_local(Rc::clone(&s).upload()),
        )?);

        let s = Rc::clone(shared);
        listeners.push(Listener::new(
            shared.copy_button.as_ref(),
            "click",
            move |_e: Event| wasm_bindgen_futures::spawn_local(Rc::clone(&s).copy()),
        )?);

        Ok(listeners)
    }
}
