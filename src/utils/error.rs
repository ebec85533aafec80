use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{backend} returned HTTP {status}: {body}")]
    BackendError {
        backend: String,
        status: u16,
        body: String,
    },

    #[error("{backend} returned no text")]
    EmptyResponse { backend: String },
}

impl ItineraryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the model backend".to_string(),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(_) => "Unexpected data format".to_string(),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::MissingConfigError { field } => format!("Missing setting: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::ValidationError { message } => message.clone(),
            Self::BackendError { backend, status, .. } => {
                format!("{} rejected the request (HTTP {})", backend, status)
            }
            Self::EmptyResponse { backend } => format!("{} returned an empty answer", backend),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check the network connection or that the local model server is running",
            Self::IoError(_) => "Check that the output directory is writable",
            Self::SerializationError(_) | Self::EmptyResponse { .. } => {
                "Try again or switch to a different model"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the config file and command-line flags",
            Self::ValidationError { .. } => "Fix the trip details and submit again",
            Self::BackendError {
                backend, status, ..
            } => match status {
                401 | 403 if backend == "gemini" => "Check GOOGLE_API_KEY",
                401 | 403 => "Check the local model server's access settings",
                404 => "Check the model name",
                429 => "Quota exhausted, wait before retrying",
                _ => "Try again later",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ItineraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_suggestions() {
        let auth = ItineraryError::BackendError {
            backend: "gemini".to_string(),
            status: 403,
            body: "denied".to_string(),
        };
        assert_eq!(auth.recovery_suggestion(), "Check GOOGLE_API_KEY");
        assert!(auth.user_friendly_message().contains("HTTP 403"));
        assert_eq!(auth.to_string(), "gemini returned HTTP 403: denied");
    }

    #[test]
    fn test_auth_suggestion_depends_on_backend() {
        let local = ItineraryError::BackendError {
            backend: "ollama".to_string(),
            status: 401,
            body: String::new(),
        };
        assert_ne!(local.recovery_suggestion(), "Check GOOGLE_API_KEY");
        assert!(local.recovery_suggestion().contains("local model server"));
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ItineraryError::validation("Please enter a location");
        assert_eq!(err.user_friendly_message(), "Please enter a location");
    }
}
