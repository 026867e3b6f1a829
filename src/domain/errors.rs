use thiserror::Error;

use super::ports::PlatformError;

/// Failure of a verification or submission request.
///
/// Every variant is terminal for the request; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    MissingInput(String),
    #[error("Email not found in Smartlead system")]
    NotFound,
    #[error("The request to the platform timed out")]
    Timeout { details: String },
    #[error("{message}")]
    Api { message: String, details: String },
    #[error("An unexpected error occurred")]
    System { details: String },
}

impl ServiceError {
    /// Stable machine-readable code reported as `status` to the caller.
    pub fn status(&self) -> &'static str {
        use ServiceError::*;

        match self {
            Validation(_) => "validation_error",
            MissingInput(_) => "missing_input",
            NotFound => "not_found",
            Timeout { .. } => "timeout",
            Api { .. } => "api_error",
            System { .. } => "system_error",
        }
    }

    /// Extra diagnostic text, never containing credentials.
    pub fn details(&self) -> Option<&str> {
        match self {
            ServiceError::Timeout { details }
            | ServiceError::Api { details, .. }
            | ServiceError::System { details } => Some(details),
            _ => None,
        }
    }

    /// Maps an adapter failure, using `api_message` as the caller-facing text
    /// for API failures.
    pub fn from_platform(error: PlatformError, api_message: &str) -> Self {
        let details = error.to_string();
        match error {
            PlatformError::Timeout(_) => ServiceError::Timeout { details },
            PlatformError::Status(_)
            | PlatformError::Transport(_)
            | PlatformError::Malformed(_) => ServiceError::Api {
                message: api_message.to_string(),
                details,
            },
            PlatformError::Other(_) => ServiceError::System { details },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_codes_are_distinct() {
        let errors = [
            ServiceError::Validation("x".into()),
            ServiceError::MissingInput("x".into()),
            ServiceError::NotFound,
            ServiceError::Timeout { details: "x".into() },
            ServiceError::Api {
                message: "x".into(),
                details: "x".into(),
            },
            ServiceError::System { details: "x".into() },
        ];
        let mut codes: Vec<_> = errors.iter().map(ServiceError::status).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn platform_errors_map_to_kinds() {
        let timeout =
            ServiceError::from_platform(PlatformError::Timeout(Duration::from_secs(10)), "m");
        assert_eq!(timeout.status(), "timeout");

        let malformed =
            ServiceError::from_platform(PlatformError::Malformed("not an array".into()), "m");
        assert_eq!(malformed.status(), "api_error");
        assert_eq!(malformed.to_string(), "m");
        assert!(malformed.details().unwrap().contains("not an array"));

        let other = ServiceError::from_platform(PlatformError::Other("boom".into()), "m");
        assert_eq!(other.status(), "system_error");
    }
}
