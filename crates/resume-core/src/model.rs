//! Typed analysis payloads and the validation step that produces them
//!
//! The server speaks loosely-typed JSON. Nothing downstream of this module
//! touches raw `serde_json::Value`s except through [`AnalysisResult::as_value`],
//! which exists so the JSON view can reproduce the payload byte-for-byte.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Export targets for the analysed document, passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLinks {
    pub json: String,
    pub csv: String,
}

/// Structured output describing the submitted document
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub name: Option<String>,
    pub email: Option<String>,
    pub predicted_domain: Option<String>,
    pub top_skills: Vec<String>,
    /// Raw score; non-numeric or absent values are stored as 0
    pub score: f64,
    /// Sub-scores in the order the server sent them
    pub score_breakdown: Vec<(String, Number)>,
    source: Value,
}

/// Body of a successful reply
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisEnvelope {
    pub result: AnalysisResult,
    pub downloads: DownloadLinks,
}

/// Body of a rejected reply
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerFailure {
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    downloads: Option<Value>,
}

#[derive(Deserialize)]
struct WireResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    predicted_domain: Option<String>,
    #[serde(default)]
    top_skills: Option<Vec<String>>,
    #[serde(default)]
    score: Value,
    #[serde(default)]
    score_breakdown: Option<Map<String, Value>>,
}

impl AnalysisResult {
    /// Validate a `result` object from the wire
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(wrong_type("result", "expected an object", &value));
        }

        let wire: WireResult =
            serde_json::from_value(value.clone()).map_err(|e| SchemaError::WrongType {
                field: "result".to_string(),
                detail: e.to_string(),
            })?;

        let score_breakdown = wire
            .score_breakdown
            .unwrap_or_default()
            .into_iter()
            .map(|(category, v)| match v {
                Value::Number(n) => Ok((category, n)),
                other => Err(wrong_type(
                    &format!("score_breakdown.{}", category),
                    "expected a number",
                    &other,
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: wire.name,
            email: wire.email,
            predicted_domain: wire.predicted_domain,
            top_skills: wire.top_skills.unwrap_or_default(),
            score: wire.score.as_f64().unwrap_or(0.0),
            score_breakdown,
            source: value,
        })
    }

    /// The payload exactly as received
    pub fn as_value(&self) -> &Value {
        &self.source
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

impl AnalysisEnvelope {
    /// Validate a parsed success body
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(wrong_type("envelope", "expected an object", &value));
        }

        let wire: WireEnvelope =
            serde_json::from_value(value).map_err(|e| SchemaError::WrongType {
                field: "envelope".to_string(),
                detail: e.to_string(),
            })?;

        let result = match wire.result {
            None | Some(Value::Null) => return Err(SchemaError::MissingField("result")),
            Some(v) => AnalysisResult::from_value(v)?,
        };

        let downloads = match wire.downloads {
            None | Some(Value::Null) => return Err(SchemaError::MissingField("downloads")),
            Some(v) => {
                serde_json::from_value::<DownloadLinks>(v).map_err(|e| SchemaError::WrongType {
                    field: "downloads".to_string(),
                    detail: e.to_string(),
                })?
            }
        };

        Ok(Self { result, downloads })
    }
}

impl ServerFailure {
    /// Extract the error message from a parsed failure body, if any
    pub fn from_value(value: &Value) -> Self {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { error }
    }
}

/// Parse a response body as JSON without applying any schema
pub fn parse_body(body: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(body).map_err(|e| SchemaError::InvalidJson(e.to_string()))
}

/// Parse and validate a success body in one step
pub fn parse_envelope(body: &str) -> Result<AnalysisEnvelope, SchemaError> {
    AnalysisEnvelope::from_value(parse_body(body)?)
}

fn wrong_type(field: &str, expected: &str, found: &Value) -> SchemaError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    SchemaError::WrongType {
        field: field.to_string(),
        detail: format!("{}, found {}", expected, found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "result": {
            "name": "jane doe",
            "email": "j@x.com",
            "predicted_domain": "finance",
            "top_skills": ["sql", "excel"],
            "score": 87.6,
            "score_breakdown": {"communication": 70, "technical": 90}
        },
        "downloads": {"json": "/d.json", "csv": "/d.csv"}
    }"#;

    #[test]
    fn test_parse_sample_envelope() {
        let envelope = parse_envelope(SAMPLE).unwrap();
        let result = &envelope.result;

        assert_eq!(result.name.as_deref(), Some("jane doe"));
        assert_eq!(result.email.as_deref(), Some("j@x.com"));
        assert_eq!(result.predicted_domain.as_deref(), Some("finance"));
        assert_eq!(result.top_skills, vec!["sql", "excel"]);
        assert_eq!(result.score, 87.6);
        assert_eq!(envelope.downloads.json, "/d.json");
        assert_eq!(envelope.downloads.csv, "/d.csv");
    }

    #[test]
    fn test_breakdown_keeps_insertion_order() {
        let body = r#"{"result":{"score":1,"score_breakdown":{"zeta":1,"alpha":2,"mid":3}},
                       "downloads":{"json":"a","csv":"b"}}"#;
        let envelope = parse_envelope(body).unwrap();
        let keys: Vec<_> = envelope
            .result
            .score_breakdown
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let body = r#"{"result":{"name":null},"downloads":{"json":"a","csv":"b"}}"#;
        let result = parse_envelope(body).unwrap().result;

        assert_eq!(result.name, None);
        assert_eq!(result.email, None);
        assert!(result.top_skills.is_empty());
        assert!(result.score_breakdown.is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_non_numeric_score_is_zero() {
        let body = r#"{"result":{"score":"high"},"downloads":{"json":"a","csv":"b"}}"#;
        assert_eq!(parse_envelope(body).unwrap().result.score, 0.0);
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            parse_envelope("<html>oops</html>"),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_rejects_missing_result() {
        let body = r#"{"downloads":{"json":"a","csv":"b"}}"#;
        assert_eq!(
            parse_envelope(body),
            Err(SchemaError::MissingField("result"))
        );
    }

    #[test]
    fn test_rejects_missing_downloads() {
        let body = r#"{"result":{}}"#;
        assert_eq!(
            parse_envelope(body),
            Err(SchemaError::MissingField("downloads"))
        );
    }

    #[test]
    fn test_rejects_wrong_types() {
        let skills = r#"{"result":{"top_skills":[1,2]},"downloads":{"json":"a","csv":"b"}}"#;
        assert!(matches!(
            parse_envelope(skills),
            Err(SchemaError::WrongType { .. })
        ));

        let breakdown =
            r#"{"result":{"score_breakdown":{"skills":"ten"}},"downloads":{"json":"a","csv":"b"}}"#;
        match parse_envelope(breakdown) {
            Err(SchemaError::WrongType { field, .. }) => {
                assert_eq!(field, "score_breakdown.skills")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let downloads = r#"{"result":{},"downloads":{"json":"a"}}"#;
        assert!(matches!(
            parse_envelope(downloads),
            Err(SchemaError::WrongType { .. })
        ));
    }

    #[test]
    fn test_serializes_as_received() {
        let body = r#"{"result":{"score":70,"name":"x","extra":[1]},"downloads":{"json":"a","csv":"b"}}"#;
        let result = parse_envelope(body).unwrap().result;
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"score":70,"name":"x","extra":[1]}"#
        );
    }

    #[test]
    fn test_server_failure_message() {
        let with_message = parse_body(r#"{"error":"unsupported file type"}"#).unwrap();
        assert_eq!(
            ServerFailure::from_value(&with_message).error.as_deref(),
            Some("unsupported file type")
        );

        let without = parse_body(r#"{"detail":"nope"}"#).unwrap();
        assert_eq!(ServerFailure::from_value(&without), ServerFailure::default());

        let empty = parse_body(r#"{"error":""}"#).unwrap();
        assert_eq!(ServerFailure::from_value(&empty).error, None);
    }
}
