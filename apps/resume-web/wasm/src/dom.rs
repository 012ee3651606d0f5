//! DOM bindings for the upload status and result panels
//!
//! Element handles are resolved once and owned by the panel structs. Rendered
//! content is built with `create_element` and `set_text_content` only, so
//! server-supplied strings never reach an HTML parser.

use js_sys::{Function, Reflect};
use resume_core::{
    render, AnalysisEnvelope, Breakdown, ClipboardExporter, ElementIds, ResultView,
    UploadError, UploadObserver,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlElement};

/// Gauge fill and track colours
const GAUGE_FILL: &str = "#198754";
const GAUGE_TRACK: &str = "#e9ecef";

/// Class hiding an element
const HIDDEN: &str = "d-none";

/// Look up an element by id and cast it to the expected type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

/// Trigger, busy indicator, progress bar and error banner
pub struct StatusPanel {
    upload_button: HtmlButtonElement,
    spinner: Element,
    upload_progress: HtmlElement,
    error_area: Element,
}

impl StatusPanel {
    pub fn from_document(document: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        Ok(Self {
            upload_button: element_by_id(document, &ids.upload_button)?,
            spinner: element_by_id(document, &ids.spinner)?,
            upload_progress: element_by_id(document, &ids.upload_progress)?,
            error_area: element_by_id(document, &ids.error_area)?,
        })
    }

    pub fn upload_button(&self) -> &HtmlButtonElement {
        &self.upload_button
    }

    /// Request in flight: banner cleared, trigger disabled, spinner shown
    pub fn begin(&self) -> Result<(), JsValue> {
        self.clear_error()?;
        self.upload_button.set_disabled(true);
        self.spinner.class_list().remove_1(HIDDEN)
    }

    pub fn set_progress(&self, percent: u8) -> Result<(), JsValue> {
        self.upload_progress
            .style()
            .set_property("width", &format!("{}%", percent))
    }

    /// Terminal outcome: trigger enabled, spinner hidden, progress reset
    pub fn settle(&self) -> Result<(), JsValue> {
        self.upload_button.set_disabled(false);
        self.spinner.class_list().add_1(HIDDEN)?;
        self.set_progress(0)
    }

    pub fn show_error(&self, message: &str) -> Result<(), JsValue> {
        self.error_area.set_text_content(Some(message));
        self.error_area.class_list().remove_1(HIDDEN)
    }

    pub fn clear_error(&self) -> Result<(), JsValue> {
        self.error_area.class_list().add_1(HIDDEN)?;
        self.error_area.set_text_content(Some(""));
        Ok(())
    }
}

/// The result area and everything inside it
pub struct ResultPanel {
    document: Document,
    result_area: Element,
    name_text: Element,
    email_text: Element,
    domain_badge: Element,
    skills: Element,
    score_circle: HtmlElement,
    breakdown_list: Element,
    json_code: Element,
    download_json: HtmlAnchorElement,
    download_csv: HtmlAnchorElement,
}

impl ResultPanel {
    pub fn from_document(document: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            result_area: element_by_id(document, &ids.result_area)?,
            name_text: element_by_id(document, &ids.name_text)?,
            email_text: element_by_id(document, &ids.email_text)?,
            domain_badge: element_by_id(document, &ids.domain_badge)?,
            skills: element_by_id(document, &ids.skills)?,
            score_circle: element_by_id(document, &ids.score_circle)?,
            breakdown_list: element_by_id(document, &ids.breakdown_list)?,
            json_code: element_by_id(document, &ids.json_code)?,
            download_json: element_by_id(document, &ids.download_json)?,
            download_csv: element_by_id(document, &ids.download_csv)?,
        })
    }

    /// Replace whatever is shown with `view`
    pub fn apply(&self, view: &ResultView) -> Result<(), JsValue> {
        self.result_area.class_list().remove_1(HIDDEN)?;

        self.name_text.set_text_content(Some(&view.name));
        self.email_text.set_text_content(Some(&view.email));
        self.domain_badge.set_text_content(Some(&view.domain));

        self.skills.set_text_content(None);
        for skill in &view.skills {
            let chip = create(&self.document, "span", "skill-chip me-2 mb-1")?;
            chip.set_text_content(Some(skill));
            self.skills.append_child(&chip)?;
        }

        self.score_circle.set_text_content(Some(&view.gauge.label));
        self.score_circle.style().set_property(
            "background",
            &view.gauge.conic_gradient(GAUGE_FILL, GAUGE_TRACK),
        )?;

        self.download_json.set_href(&view.downloads.json);
        self.download_csv.set_href(&view.downloads.csv);

        self.apply_breakdown(&view.breakdown)?;

        self.json_code.set_text_content(Some(&view.json));
        highlight(&self.json_code);

        Ok(())
    }

    fn apply_breakdown(&self, breakdown: &Breakdown) -> Result<(), JsValue> {
        self.breakdown_list.set_text_content(None);

        let rows = match breakdown {
            Breakdown::Placeholder(text) => {
                let none = create(&self.document, "div", "text-muted small")?;
                none.set_text_content(Some(text));
                self.breakdown_list.append_child(&none)?;
                return Ok(());
            }
            Breakdown::Rows(rows) => rows,
        };

        for row in rows {
            let item = create(&self.document, "div", "list-group-item bg-transparent border-0 p-2")?;

            let header = create(&self.document, "div", "d-flex w-100 justify-content-between")?;
            let label = create(&self.document, "div", "fw-medium text-white")?;
            label.set_text_content(Some(&row.label));
            let value = create(&self.document, "small", "text-muted")?;
            value.set_text_content(Some(&row.value_text));
            header.append_child(&label)?;
            header.append_child(&value)?;

            let track = create(&self.document, "div", "progress mt-2")?;
            track.set_attribute("style", "height:8px; background: rgba(255,255,255,0.04)")?;
            let bar = create(&self.document, "div", "progress-bar bg-info")?;
            bar.set_attribute("role", "progressbar")?;
            bar.set_attribute("style", &format!("width: {}", row.width_css()))?;
            track.append_child(&bar)?;

            item.append_child(&header)?;
            item.append_child(&track)?;
            self.breakdown_list.append_child(&item)?;
        }

        Ok(())
    }
}

/// Run Prism highlighting on `element` when the page loaded Prism
fn highlight(element: &Element) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let prism = match Reflect::get(&window, &"Prism".into()) {
        Ok(p) if !p.is_undefined() && !p.is_null() => p,
        _ => return,
    };
    let highlighted = Reflect::get(&prism, &"highlightElement".into())
        .and_then(|f| f.dyn_into::<Function>())
        .and_then(|f| f.call1(&prism, element));
    if let Err(e) = highlighted {
        tracing::warn!(error = ?e, "syntax highlighting failed");
    }
}

/// Connects upload events to the page
pub struct WebObserver {
    status: StatusPanel,
    results: ResultPanel,
    exporter: Rc<RefCell<ClipboardExporter>>,
    max_skills: usize,
}

impl WebObserver {
    pub fn new(
        status: StatusPanel,
        results: ResultPanel,
        exporter: Rc<RefCell<ClipboardExporter>>,
        max_skills: usize,
    ) -> Self {
        Self {
            status,
            results,
            exporter,
            max_skills,
        }
    }

    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    fn show(&self, envelope: &AnalysisEnvelope) -> Result<(), JsValue> {
        self.status.settle()?;
        let view = render(&envelope.result, &envelope.downloads, self.max_skills);
        self.results.apply(&view)?;
        self.exporter.borrow_mut().set_payload(view.json);
        Ok(())
    }

    fn report(&self, error: &UploadError) -> Result<(), JsValue> {
        self.status.settle()?;
        self.status.show_error(&error.to_string())
    }
}

fn log_dom_error(stage: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::error!(stage, error = ?e, "failed to update page");
    }
}

impl UploadObserver for WebObserver {
    fn started(&self) {
        log_dom_error("start", self.status.begin());
    }

    fn progress(&self, percent: u8) {
        log_dom_error("progress", self.status.set_progress(percent));
    }

    fn succeeded(&self, envelope: &AnalysisEnvelope) {
        log_dom_error("render", self.show(envelope));
    }

    fn failed(&self, error: &UploadError) {
        log_dom_error("error", self.report(error));
    }
}
