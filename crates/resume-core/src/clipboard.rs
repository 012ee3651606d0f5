//! Copy-to-clipboard state
//!
//! The exporter only remembers what to copy and how the button should look.
//! Writing to the system clipboard and scheduling the label restore are left
//! to the platform binding.

use std::time::Duration;

/// Button labels and the confirmation window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyLabels {
    /// Label (markup) the button shows at rest
    pub idle: String,
    /// Label shown after a successful copy
    pub confirmation: String,
    pub feedback: Duration,
}

impl CopyLabels {
    pub fn new(idle: impl Into<String>, confirmation: impl Into<String>, feedback_ms: u32) -> Self {
        Self {
            idle: idle.into(),
            confirmation: confirmation.into(),
            feedback: Duration::from_millis(u64::from(feedback_ms)),
        }
    }
}

/// Holds the JSON of the most recent render
#[derive(Debug, Clone)]
pub struct ClipboardExporter {
    payload: Option<String>,
    labels: CopyLabels,
}

impl ClipboardExporter {
    pub fn new(labels: CopyLabels) -> Self {
        Self {
            payload: None,
            labels,
        }
    }

    /// Replace the payload with the JSON of a new render
    pub fn set_payload(&mut self, json: impl Into<String>) {
        self.payload = Some(json.into());
    }

    /// Exactly the rendered JSON, if anything has been rendered yet
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn labels(&self) -> &CopyLabels {
        &self.labels
    }

    /// Milliseconds the confirmation stays visible, as a timer argument
    pub fn feedback_ms(&self) -> i32 {
        i32::try_from(self.labels.feedback.as_millis()).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exporter() -> ClipboardExporter {
        ClipboardExporter::new(CopyLabels::new("Copy JSON", "Copied ✓", 1500))
    }

    #[test]
    fn test_no_payload_before_render() {
        assert_eq!(exporter().payload(), None);
    }

    #[test]
    fn test_payload_is_latest_render() {
        let mut exporter = exporter();
        exporter.set_payload("{\n  \"a\": 1\n}");
        exporter.set_payload("{\n  \"b\": 2\n}");
        assert_eq!(exporter.payload(), Some("{\n  \"b\": 2\n}"));
    }

    #[test]
    fn test_feedback_window() {
        let exporter = exporter();
        assert_eq!(exporter.feedback_ms(), 1500);
        assert_eq!(exporter.labels().feedback, Duration::from_millis(1500));
        assert_eq!(exporter.labels().confirmation, "Copied ✓");
    }
}
