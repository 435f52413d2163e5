use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    /// 客戶資料已寫入，但寵物資料寫入失敗
    #[error("{message}")]
    PartialFailure { client_id: String, message: String },

    #[error("A submission is already in progress for this form")]
    SubmissionInFlight,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Upstream,
    Network,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::SubmissionInFlight => ErrorCategory::Input,
            Self::Upstream { .. } | Self::PartialFailure { .. } => ErrorCategory::Upstream,
            Self::Http(_) => ErrorCategory::Network,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::Serialization(_) | Self::Io(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Upstream | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 顯示給使用者的訊息。上游錯誤原文照錄，部分失敗與一般上游錯誤不作區分。
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Upstream { message, .. }
            | Self::PartialFailure { message, .. } => message.clone(),
            Self::SubmissionInFlight => "Please wait for the current submission to finish.".to_string(),
            Self::Http(_) => "Could not reach the service. Please try again.".to_string(),
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            Self::Serialization(_) | Self::Io(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Correct the highlighted field and submit again",
            ErrorCategory::Upstream => "Submit the form again; contact support if the problem persists",
            ErrorCategory::Network => "Check your network connection and the backend URL",
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
            ErrorCategory::Internal => "Run again with --verbose and report the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
