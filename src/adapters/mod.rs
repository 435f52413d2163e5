// Adapters layer: reqwest implementations of the domain ports.

pub mod notifier;
pub mod supabase;

pub use notifier::HttpNotifier;
pub use supabase::SupabaseClient;

use crate::utils::error::{IntakeError, Result};
use reqwest::{Response, StatusCode};

/// 從錯誤回應中取出訊息，依序嘗試常見欄位
pub(crate) fn extract_error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

/// Checks the status only; the body of a successful response is discarded.
pub(crate) async fn ensure_success(response: Response) -> Result<()> {
    let status = response.status();
    tracing::debug!("📡 Upstream response status: {}", status);
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await?;
    tracing::debug!("Upstream error body: {}", body);
    Err(IntakeError::upstream(
        Some(status.as_u16()),
        extract_error_message(&body, status),
    ))
}

/// Reads a response body as JSON, turning non-2xx statuses into upstream errors.
/// An empty successful body reads as `null`.
pub(crate) async fn read_json(response: Response) -> Result<serde_json::Value> {
    let status = response.status();
    let body = response.text().await?;
    tracing::debug!("📡 Upstream response status: {}", status);

    if !status.is_success() {
        let message = extract_error_message(&body, status);
        tracing::debug!("Upstream error body: {}", body);
        return Err(IntakeError::upstream(Some(status.as_u16()), message));
    }

    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_key() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null}"#;
        assert_eq!(
            extract_error_message(body, StatusCode::CONFLICT),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn error_message_reads_auth_style_bodies() {
        assert_eq!(
            extract_error_message(r#"{"msg":"Invalid JWT"}"#, StatusCode::UNAUTHORIZED),
            "Invalid JWT"
        );
        assert_eq!(
            extract_error_message(
                r#"{"error":"invalid_grant","error_description":"Refresh token not found"}"#,
                StatusCode::BAD_REQUEST
            ),
            "Refresh token not found"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            extract_error_message("<html>Bad gateway</html>", StatusCode::BAD_GATEWAY),
            "Request failed with status 502"
        );
    }
}
