//! Upload lifecycle
//!
//! [`UploadController`] owns the request lifecycle: it enforces the single
//! in-flight invariant, forwards transfer progress, interprets the reply and
//! reports exactly one terminal event per attempt. The network itself sits
//! behind [`UploadTransport`] so the lifecycle can be driven without a browser.

use crate::config::ClientConfig;
use crate::error::{TransportError, UploadError, SERVER_ERROR_FALLBACK};
use crate::model::{parse_body, AnalysisEnvelope, ServerFailure};
use crate::selector::PendingFile;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// The only status treated as success
pub const SUCCESS_STATUS: u16 = 200;

/// Lifecycle of the single upload slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl UploadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::InFlight => "in-flight",
            UploadState::Succeeded => "succeeded",
            UploadState::Failed => "failed",
        }
    }
}

/// A multipart POST carrying one file field
#[derive(Debug, Clone)]
pub struct UploadRequest<P> {
    pub endpoint: String,
    pub field_name: String,
    pub file: PendingFile<P>,
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Receives the observable events of an upload attempt
pub trait UploadObserver {
    /// A request is about to be sent; clear the banner and disable the trigger
    fn started(&self);
    fn progress(&self, percent: u8);
    fn succeeded(&self, envelope: &AnalysisEnvelope);
    fn failed(&self, error: &UploadError);
}

/// Sends an [`UploadRequest`] and resolves once a reply (of any status) arrives
pub trait UploadTransport {
    type Payload;

    /// Resolve with `Err` only when no response was received at all
    fn post(
        &self,
        request: UploadRequest<Self::Payload>,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<HttpReply, TransportError>>;
}

/// Progress channel handed to the transport for one attempt.
///
/// Closed when the attempt reaches its terminal outcome; reports after that
/// are dropped.
#[derive(Clone)]
pub struct ProgressSink {
    open: Rc<Cell<bool>>,
    observer: Rc<dyn UploadObserver>,
}

impl ProgressSink {
    fn new(observer: Rc<dyn UploadObserver>) -> Self {
        Self {
            open: Rc::new(Cell::new(true)),
            observer,
        }
    }

    /// Report a transfer event; `total` is `None` when the length is unknown.
    ///
    /// Returns the percentage delivered to the observer, if any.
    pub fn report(&self, loaded: f64, total: Option<f64>) -> Option<u8> {
        if !self.open.get() {
            return None;
        }
        let percent = progress_percent(loaded, total?)?;
        self.observer.progress(percent);
        Some(percent)
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    fn close(&self) {
        self.open.set(false);
    }
}

/// `round(loaded / total * 100)`, clamped to 0..=100
pub fn progress_percent(loaded: f64, total: f64) -> Option<u8> {
    if !(total > 0.0) || !loaded.is_finite() {
        return None;
    }
    Some((loaded / total * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// Turn a completed reply into a result or a banner-ready error.
///
/// The body is parsed before the status is looked at, so an unparseable error
/// page is reported as a malformed response.
pub fn interpret_reply(status: u16, body: &str) -> Result<AnalysisEnvelope, UploadError> {
    let value = parse_body(body)?;

    if status != SUCCESS_STATUS {
        let message = ServerFailure::from_value(&value)
            .error
            .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
        return Err(UploadError::ServerRejected { status, message });
    }

    Ok(AnalysisEnvelope::from_value(value)?)
}

/// Drives upload attempts against one endpoint
pub struct UploadController<T: UploadTransport> {
    transport: T,
    endpoint: String,
    field_name: String,
    state: Cell<UploadState>,
    observer: Rc<dyn UploadObserver>,
}

impl<T: UploadTransport> UploadController<T> {
    pub fn new(transport: T, config: &ClientConfig, observer: Rc<dyn UploadObserver>) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
            state: Cell::new(UploadState::Idle),
            observer,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state.get()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.get() == UploadState::InFlight
    }

    /// Run one upload attempt to completion.
    ///
    /// Every outcome except [`UploadError::InFlight`] is also delivered to the
    /// observer. There is no retry and no cancellation.
    pub async fn start(
        &self,
        file: Option<PendingFile<T::Payload>>,
    ) -> Result<AnalysisEnvelope, UploadError> {
        if self.is_in_flight() {
            tracing::warn!("upload requested while another is in flight");
            return Err(UploadError::InFlight);
        }

        let Some(file) = file else {
            let error = UploadError::NoFileSelected;
            tracing::debug!("upload requested without a file");
            self.observer.failed(&error);
            return Err(error);
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            name = %file.name,
            size = file.size_bytes,
            "upload started"
        );
        self.state.set(UploadState::InFlight);
        self.observer.started();

        let request = UploadRequest {
            endpoint: self.endpoint.clone(),
            field_name: self.field_name.clone(),
            file,
        };
        let sink = ProgressSink::new(Rc::clone(&self.observer));
        let reply = self.transport.post(request, sink.clone()).await;
        sink.close();

        let outcome = match reply {
            Ok(reply) => interpret_reply(reply.status, &reply.body),
            Err(e) => {
                tracing::warn!(detail = %e, "upload transport failed");
                Err(UploadError::Transport(e))
            }
        };

        match &outcome {
            Ok(envelope) => {
                self.state.set(UploadState::Succeeded);
                tracing::debug!(
                    skills = envelope.result.top_skills.len(),
                    "upload succeeded"
                );
                self.observer.succeeded(envelope);
            }
            Err(error) => {
                self.state.set(UploadState::Failed);
                tracing::warn!(kind = ?error.kind(), %error, "upload failed");
                self.observer.failed(error);
            }
        }

        outcome
    }
}
