use crate::core::submission::SubmissionSettings;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const MAX_RESET_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PawsConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub forms: FormsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: Option<String>,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub endpoint: Option<String>,
    #[serde(default = "default_primary_recipient")]
    pub primary_recipient: String,
    #[serde(default = "default_support_recipient")]
    pub support_recipient: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            primary_recipient: default_primary_recipient(),
            support_recipient: default_support_recipient(),
        }
    }
}

fn default_primary_recipient() -> String {
    "info@littlepawsjax.com".to_string()
}

fn default_support_recipient() -> String {
    "support@littlepawsjax.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
    #[serde(default = "default_rollback")]
    pub rollback_on_partial_failure: bool,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: default_reset_delay_ms(),
            rollback_on_partial_failure: default_rollback(),
        }
    }
}

fn default_reset_delay_ms() -> u64 {
    2000
}

fn default_rollback() -> bool {
    true
}

fn env_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap())
}

impl PawsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            reset_delay: Duration::from_millis(self.forms.reset_delay_ms),
            primary_recipient: self.notifications.primary_recipient.clone(),
            support_recipient: self.notifications.support_recipient.clone(),
            rollback_on_partial_failure: self.forms.rollback_on_partial_failure,
        }
    }

    fn validate_key(field: &str, value: &str) -> Result<()> {
        validate_non_empty_string(field, value)?;
        if env_placeholder().is_match(value) {
            return Err(IntakeError::InvalidConfigValueError {
                field: field.to_string(),
                value: value.to_string(),
                reason: "Environment variable is not set".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for PawsConfig {
    fn validate(&self) -> Result<()> {
        validate_url("backend.url", &self.backend.url)?;
        Self::validate_key("backend.anon_key", &self.backend.anon_key)?;
        if let Some(key) = &self.backend.service_role_key {
            Self::validate_key("backend.service_role_key", key)?;
        }
        if let Some(endpoint) = &self.notifications.endpoint {
            validate_url("notifications.endpoint", endpoint)?;
        }
        validate_email("notifications.primary_recipient", &self.notifications.primary_recipient)?;
        validate_email("notifications.support_recipient", &self.notifications.support_recipient)?;
        validate_range("forms.reset_delay_ms", self.forms.reset_delay_ms, 0, MAX_RESET_DELAY_MS)?;
        Ok(())
    }
}
