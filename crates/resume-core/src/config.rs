//! Client configuration
//!
//! Every field has a default matching the stock page, so an empty JSON object
//! (or no configuration at all) yields a working client.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// Top-level client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint receiving the multipart POST
    pub endpoint: String,
    /// Form field carrying the file
    pub field_name: String,
    /// Number of skill chips rendered
    pub max_skills: usize,
    /// How long the copy confirmation stays visible (default: 1500)
    pub copy_feedback_ms: u32,
    /// Label shown on the copy button after a successful copy
    pub copied_label: String,
    /// DOM ids of the page elements
    pub elements: ElementIds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/process".to_string(),
            field_name: "file".to_string(),
            max_skills: 12,
            copy_feedback_ms: 1500,
            copied_label: "Copied ✓".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl ClientConfig {
    /// Parse configuration from a JSON string and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is unusable
    ///
    /// # Example
    ///
    /// ```
    /// use resume_core::config::ClientConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ClientConfig::from_json(r#"{"endpoint": "/v2/process"}"#)?;
    /// assert_eq!(config.endpoint, "/v2/process");
    /// assert_eq!(config.max_skills, 12);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_str(s).context("Failed to parse client configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can actually be used
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.endpoint.trim().is_empty(), "endpoint must not be empty");
        ensure!(
            !self.field_name.trim().is_empty(),
            "field_name must not be empty"
        );
        ensure!(self.max_skills > 0, "max_skills must be at least 1");
        self.elements
            .all()
            .iter()
            .try_for_each(|(key, id)| -> anyhow::Result<()> {
                ensure!(!id.trim().is_empty(), "element id `{}` must not be empty", key);
                Ok(())
            })
    }
}

/// DOM ids of every element the client binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub file_input: String,
    pub upload_button: String,
    pub spinner: String,
    pub result_area: String,
    pub json_code: String,
    pub download_json: String,
    pub download_csv: String,
    pub error_area: String,
    pub drop_zone: String,
    pub file_name: String,
    pub upload_progress: String,
    pub name_text: String,
    pub email_text: String,
    pub domain_badge: String,
    pub skills: String,
    pub score_circle: String,
    pub copy_json: String,
    pub breakdown_list: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            file_input: "fileInput".to_string(),
            upload_button: "uploadBtn".to_string(),
            spinner: "spinner".to_string(),
            result_area: "resultArea".to_string(),
            json_code: "jsonCode".to_string(),
            download_json: "downloadJson".to_string(),
            download_csv: "downloadCsv".to_string(),
            error_area: "errorArea".to_string(),
            drop_zone: "dropZone".to_string(),
            file_name: "fileName".to_string(),
            upload_progress: "uploadProgress".to_string(),
            name_text: "nameText".to_string(),
            email_text: "emailText".to_string(),
            domain_badge: "domainBadge".to_string(),
            skills: "skills".to_string(),
            score_circle: "scoreCircle".to_string(),
            copy_json: "copyJson".to_string(),
            breakdown_list: "breakdownList".to_string(),
        }
    }
}

impl ElementIds {
    fn all(&self) -> [(&'static str, &str); 18] {
        [
            ("fileInput", self.file_input.as_str()),
            ("uploadButton", self.upload_button.as_str()),
            ("spinner", self.spinner.as_str()),
            ("resultArea", self.result_area.as_str()),
            ("jsonCode", self.json_code.as_str()),
            ("downloadJson", self.download_json.as_str()),
            ("downloadCsv", self.download_csv.as_str()),
            ("errorArea", self.error_area.as_str()),
            ("dropZone", self.drop_zone.as_str()),
            ("fileName", self.file_name.as_str()),
            ("uploadProgress", self.upload_progress.as_str()),
            ("nameText", self.name_text.as_str()),
            ("emailText", self.email_text.as_str()),
            ("domainBadge", self.domain_badge.as_str()),
            ("skills", self.skills.as_str()),
            ("scoreCircle", self.score_circle.as_str()),
            ("copyJson", self.copy_json.as_str()),
            ("breakdownList", self.breakdown_list.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "/api/process");
        assert_eq!(config.field_name, "file");
        assert_eq!(config.max_skills, 12);
        assert_eq!(config.copy_feedback_ms, 1500);
        assert_eq!(config.elements.upload_button, "uploadBtn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig::from_json(
            r#"{"max_skills": 5, "elements": {"uploadButton": "go"}}"#,
        )
        .unwrap();
        assert_eq!(config.max_skills, 5);
        assert_eq!(config.elements.upload_button, "go");
        assert_eq!(config.elements.file_input, "fileInput");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(ClientConfig::from_json(r#"{"endpoint": ""}"#).is_err());
        assert!(ClientConfig::from_json(r#"{"field_name": " "}"#).is_err());
        assert!(ClientConfig::from_json(r#"{"max_skills": 0}"#).is_err());
        assert!(ClientConfig::from_json(r#"{"elements": {"skills": ""}}"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ClientConfig::from_json("{endpoint").unwrap_err();
        assert!(err.to_string().contains("Failed to parse client configuration"));
    }
}
