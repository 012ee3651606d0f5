//! Pending-file selection
//!
//! Holds the one file the user has chosen but not yet submitted. The payload
//! type is generic so the browser binding can keep a `web_sys::File` handle
//! while tests use plain bytes.

/// The single file the user has chosen
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile<P = Vec<u8>> {
    pub name: String,
    pub size_bytes: u64,
    pub payload: P,
}

impl<P> PendingFile<P> {
    pub fn new(name: impl Into<String>, size_bytes: u64, payload: P) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            payload,
        }
    }

    /// Human-readable label, e.g. `resume.pdf • 42 KB`
    pub fn label(&self) -> String {
        file_label(&self.name, self.size_bytes)
    }
}

impl PendingFile<Vec<u8>> {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self::new(name, size_bytes, bytes)
    }
}

/// Format `{name} • {size in KB, rounded}`
pub fn file_label(name: &str, size_bytes: u64) -> String {
    let kb = (size_bytes as f64 / 1024.0).round() as u64;
    format!("{} • {} KB", name, kb)
}

/// Owns the pending file; last selection wins
#[derive(Debug)]
pub struct FileSelector<P = Vec<u8>> {
    pending: Option<PendingFile<P>>,
}

impl<P> Default for FileSelector<P> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<P: Clone> FileSelector<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the first file of a drop or picker change.
    ///
    /// Returns the new label, or `None` when the event carried no files (the
    /// previous selection is kept).
    pub fn select_first<I>(&mut self, files: I) -> Option<String>
    where
        I: IntoIterator<Item = PendingFile<P>>,
    {
        let file = files.into_iter().next()?;
        let label = file.label();
        tracing::debug!(name = %file.name, size = file.size_bytes, "file selected");
        self.pending = Some(file);
        Some(label)
    }

    pub fn pending(&self) -> Option<&PendingFile<P>> {
        self.pending.as_ref()
    }

    /// Copy of the pending file to hand to the upload controller
    pub fn snapshot(&self) -> Option<PendingFile<P>> {
        self.pending.clone()
    }

    pub fn label(&self) -> Option<String> {
        self.pending.as_ref().map(PendingFile::label)
    }
}

/// Presentation-only drag-over flag of the drop zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    dragging: bool,
}

/// Drag events that affect the drop zone highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEventKind {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragEventKind {
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "dragenter" => Some(Self::Enter),
            "dragover" => Some(Self::Over),
            "dragleave" => Some(Self::Leave),
            "drop" => Some(Self::Drop),
            _ => None,
        }
    }
}

impl DropZone {
    /// Apply an event and return whether the highlight should be shown
    pub fn apply(&mut self, kind: DragEventKind) -> bool {
        self.dragging = matches!(kind, DragEventKind::Enter | DragEventKind::Over);
        self.dragging
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_label_rounds_kilobytes() {
        assert_eq!(file_label("cv.pdf", 0), "cv.pdf • 0 KB");
        assert_eq!(file_label("cv.pdf", 511), "cv.pdf • 0 KB");
        assert_eq!(file_label("cv.pdf", 512), "cv.pdf • 1 KB");
        assert_eq!(file_label("cv.pdf", 43_520), "cv.pdf • 43 KB");
        assert_eq!(file_label("cv.pdf", 1_048_576), "cv.pdf • 1024 KB");
    }

    #[test]
    fn test_select_first_takes_first_file() {
        let mut selector = FileSelector::new();
        let label = selector.select_first(vec![
            PendingFile::from_bytes("a.pdf", vec![0; 2048]),
            PendingFile::from_bytes("b.pdf", vec![0; 10]),
        ]);

        assert_eq!(label.as_deref(), Some("a.pdf • 2 KB"));
        assert_eq!(selector.pending().map(|f| f.name.as_str()), Some("a.pdf"));
    }

    #[test]
    fn test_empty_selection_keeps_previous() {
        let mut selector = FileSelector::new();
        selector.select_first(vec![PendingFile::from_bytes("a.pdf", vec![1])]);

        assert_eq!(selector.select_first(Vec::new()), None);
        assert_eq!(selector.pending().map(|f| f.name.as_str()), Some("a.pdf"));
    }

    #[test]
    fn test_reselection_replaces_wholesale() {
        let mut selector = FileSelector::new();
        selector.select_first(vec![PendingFile::from_bytes("a.pdf", vec![1, 2])]);
        selector.select_first(vec![PendingFile::from_bytes("a.pdf", vec![3])]);

        let pending = selector.snapshot().unwrap();
        assert_eq!(pending.payload, vec![3]);
        assert_eq!(pending.size_bytes, 1);
    }

    #[test]
    fn test_drop_zone_highlight() {
        let mut zone = DropZone::default();
        assert!(zone.apply(DragEventKind::Enter));
        assert!(zone.apply(DragEventKind::Over));
        assert!(!zone.apply(DragEventKind::Leave));
        assert!(zone.apply(DragEventKind::Over));
        assert!(!zone.apply(DragEventKind::Drop));
        assert!(!zone.is_dragging());
    }

    #[test]
    fn test_drag_event_kind_parsing() {
        assert_eq!(
            DragEventKind::from_event_type("dragenter"),
            Some(DragEventKind::Enter)
        );
        assert_eq!(DragEventKind::from_event_type("drop"), Some(DragEventKind::Drop));
        assert_eq!(DragEventKind::from_event_type("click"), None);
    }
}
