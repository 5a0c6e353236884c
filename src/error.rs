use thiserror::Error;

/// Error taxonomy for the client core.
///
/// Every variant is terminal for the action that raised it but never fatal
/// for the session: callers surface the message and keep going.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected user input: non-numeric/out-of-range anthropometric fields,
    /// a macro split that does not sum to 100%, and similar edge validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Any collaborator call failing, surfaced verbatim. No retry is performed.
    #[error("{0}")]
    RemoteFailure(String),

    /// Export was requested without a patient snapshot; rendering is aborted
    /// instead of producing a malformed document.
    #[error("no patient data found; complete patient intake first")]
    MissingPatientContext,

    /// The PDF backend refused the document; surfaced as user feedback.
    #[error("could not generate PDF: {0}")]
    ExportFailure(String),
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteFailure(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_displays_server_message_verbatim() {
        let err = AppError::remote("Patient not found");
        assert_eq!(err.to_string(), "Patient not found");
    }

    #[test]
    fn invalid_input_is_prefixed() {
        let err = AppError::invalid_input("weight must be positive");
        assert_eq!(err.to_string(), "invalid input: weight must be positive");
    }
}
