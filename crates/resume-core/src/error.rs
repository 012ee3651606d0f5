use thiserror::Error;

/// Banner text when the trigger is pressed before a file was chosen
pub const NO_FILE_MESSAGE: &str = "Please select a PDF file first.";

/// Banner text when a non-success reply carries no `error` field
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

/// The request never produced a response (offline, DNS, CORS, ...)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

/// Why a wire payload could not be converted into typed values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field `{field}` has the wrong type: {detail}")]
    WrongType { field: String, detail: String },
}

/// Category of an upload failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LocalValidation,
    Transport,
    ServerRejected,
    MalformedResponse,
    Busy,
}

/// Every way an upload attempt can end without a rendered result.
///
/// The `Display` output is exactly the text shown in the error banner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("{}", NO_FILE_MESSAGE)]
    NoFileSelected,

    #[error("Network error during upload")]
    Transport(#[source] TransportError),

    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    #[error("Invalid server response")]
    MalformedResponse {
        #[source]
        detail: SchemaError,
    },

    #[error("An upload is already in progress")]
    InFlight,
}

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::NoFileSelected => ErrorKind::LocalValidation,
            UploadError::Transport(_) => ErrorKind::Transport,
            UploadError::ServerRejected { .. } => ErrorKind::ServerRejected,
            UploadError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            UploadError::InFlight => ErrorKind::Busy,
        }
    }
}

impl From<SchemaError> for UploadError {
    fn from(detail: SchemaError) -> Self {
        UploadError::MalformedResponse { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_messages() {
        assert_eq!(
            UploadError::NoFileSelected.to_string(),
            "Please select a PDF file first."
        );
        assert_eq!(
            UploadError::Transport(TransportError::new("offline")).to_string(),
            "Network error during upload"
        );
        assert_eq!(
            UploadError::ServerRejected {
                status: 500,
                message: "unsupported file type".to_string()
            }
            .to_string(),
            "unsupported file type"
        );
        assert_eq!(
            UploadError::from(SchemaError::MissingField("result")).to_string(),
            "Invalid server response"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(UploadError::NoFileSelected.kind(), ErrorKind::LocalValidation);
        assert_eq!(UploadError::InFlight.kind(), ErrorKind::Busy);
        assert_eq!(
            UploadError::from(SchemaError::InvalidJson("eof".into())).kind(),
            ErrorKind::MalformedResponse
        );
    }
}
