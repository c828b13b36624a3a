use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to fetch media from {url}: {reason}")]
    MediaFetchError { url: String, reason: String },

    #[error("Publishing failed: {message}")]
    PublishError { message: String },

    #[error("Metadata save failed: {message}")]
    MetadataError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PageError::ConfigError { .. }
            | PageError::MissingConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::TomlError(_) => ErrorCategory::Configuration,
            PageError::HttpError(_) | PageError::MediaFetchError { .. } => ErrorCategory::Network,
            PageError::IoError(_)
            | PageError::PublishError { .. }
            | PageError::MetadataError { .. } => ErrorCategory::Storage,
            PageError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 媒體與中繼資料失敗不會阻擋發佈
            PageError::MediaFetchError { .. } | PageError::MetadataError { .. } => {
                ErrorSeverity::Low
            }
            PageError::HttpError(_) | PageError::PublishError { .. } => ErrorSeverity::Medium,
            PageError::ConfigError { .. }
            | PageError::MissingConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::TomlError(_)
            | PageError::SerializationError(_) => ErrorSeverity::High,
            PageError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the profile and config files for missing or malformed fields",
            ErrorCategory::Network => "Check network connectivity and that the URL is reachable, then retry",
            ErrorCategory::Storage => "Check storage credentials and permissions, then retry publishing",
            ErrorCategory::Data => "Make sure the profile file is valid JSON or TOML",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PageError::MissingConfigError { field } => {
                format!("Please fill in '{}' before creating the page", field)
            }
            PageError::PublishError { .. } | PageError::HttpError(_) => {
                format!("Could not publish the page: {}", self)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let err = PageError::MetadataError {
            message: "db down".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Storage);

        let err = PageError::MissingConfigError {
            field: "recipientName".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("recipientName"));
    }
}
