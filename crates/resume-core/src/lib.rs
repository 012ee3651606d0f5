//! Resume analysis client core
//!
//! Platform-independent half of the browser client that submits one document
//! to the analysis endpoint and displays the structured result.
//!
//! - [`selector`]: the single pending file and its label
//! - [`upload`]: request lifecycle, progress and reply interpretation
//! - [`model`]: typed result payloads and their validation from wire JSON
//! - [`render`]: pure mapping from a result to everything the panel shows
//! - [`clipboard`]: what the copy button copies and how it reacts
//!
//! Nothing here touches the DOM; the `resume-wasm` crate binds these pieces
//! to the page.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod selector;
pub mod upload;

pub use clipboard::{ClipboardExporter, CopyLabels};
pub use config::{ClientConfig, ElementIds};
pub use error::{ErrorKind, SchemaError, TransportError, UploadError};
pub use model::{parse_envelope, AnalysisEnvelope, AnalysisResult, DownloadLinks};
pub use render::{render, Breakdown, BreakdownRow, ResultView, ScoreGauge};
pub use selector::{file_label, DragEventKind, DropZone, FileSelector, PendingFile};
pub use upload::{
    interpret_reply, HttpReply, ProgressSink, UploadController, UploadObserver, UploadRequest,
    UploadState, UploadTransport,
};
