//! Hosted backend client: REST record API and auth API.

use crate::adapters::{ensure_success, read_json};
use crate::config::toml_config::BackendConfig;
use crate::domain::model::{Collection, CreatedRecord, RecordId, Session, SessionUser};
use crate::domain::ports::{IdentityProvider, RecordStore};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use url::Url;

pub struct SupabaseClient {
    base_url: Url,
    anon_key: String,
    service_role_key: Option<String>,
    access_token: RwLock<Option<String>>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
    role: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl From<AuthUser> for SessionUser {
    fn from(user: AuthUser) -> Self {
        let role = user
            .user_metadata
            .get("role")
            .and_then(|r| r.as_str())
            .map(str::to_string)
            .or(user.role);
        SessionUser {
            id: user.id,
            email: user.email,
            role,
        }
    }
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut base = config.url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| IntakeError::InvalidConfigValueError {
            field: "backend.url".to_string(),
            value: config.url.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
            access_token: RwLock::new(config.access_token.clone()),
            client: builder.build()?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| IntakeError::ConfigValidationError {
                field: "backend.url".to_string(),
                message: format!("Cannot build endpoint '{}': {}", path, e),
            })
    }

    /// Attaches the project key and the caller's bearer token (falls back to the anon key).
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.read().await.clone();
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(token.as_deref().unwrap_or(&self.anon_key))
    }

    fn service_key(&self) -> Result<&str> {
        self.service_role_key
            .as_deref()
            .ok_or_else(|| IntakeError::MissingConfigError {
                field: "backend.service_role_key".to_string(),
            })
    }

    /// 建立管理員帳號：先以 admin API 建立已驗證使用者，再呼叫 set_user_as_admin
    pub async fn create_admin_user(&self, email: &str, password: &str) -> Result<()> {
        let key = self.service_key()?;

        let user_url = self.endpoint("auth/v1/admin/users")?;
        tracing::debug!("Creating admin user {}", email);
        let response = self
            .client
            .post(user_url)
            .header("apikey", key)
            .bearer_auth(key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
                "user_metadata": { "role": "admin" },
            }))
            .send()
            .await?;
        ensure_success(response).await?;

        let rpc_url = self.endpoint("rest/v1/rpc/set_user_as_admin")?;
        let response = self
            .client
            .post(rpc_url)
            .header("apikey", key)
            .bearer_auth(key)
            .json(&serde_json::json!({ "user_email": email }))
            .send()
            .await?;
        ensure_success(response).await?;

        tracing::info!("✅ Admin user {} created", email);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn insert(&self, collection: Collection, record: serde_json::Value) -> Result<CreatedRecord> {
        let url = self.endpoint(&format!("rest/v1/{}", collection.table_name()))?;
        tracing::debug!("Inserting into {}", collection);

        let request = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(&record);
        let response = self.authorize(request).await.send().await?;

        let row = match read_json(response).await? {
            serde_json::Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            row @ serde_json::Value::Object(_) => row,
            _ => {
                return Err(IntakeError::upstream(
                    None,
                    format!("Insert into {} returned no row", collection),
                ))
            }
        };

        let id = row
            .get("id")
            .filter(|id| !id.is_null())
            .cloned()
            .ok_or_else(|| {
                IntakeError::upstream(None, format!("Insert into {} returned no id", collection))
            })?;

        Ok(CreatedRecord {
            id: RecordId(id),
            data: row,
        })
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> Result<()> {
        let url = self.endpoint(&format!("rest/v1/{}", collection.table_name()))?;
        tracing::debug!("Deleting {} from {}", id, collection);

        let request = self
            .client
            .delete(url)
            .query(&[("id", format!("eq.{}", id))]);
        let response = self.authorize(request).await.send().await?;
        ensure_success(response).await
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>> {
        let Some(token) = self.access_token.read().await.clone() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.endpoint("auth/v1/user")?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            tracing::debug!("Stored access token was rejected, treating as signed out");
            return Ok(None);
        }

        let user: AuthUser = serde_json::from_value(read_json(response).await?)?;
        Ok(Some(Session {
            access_token: token,
            user: user.into(),
        }))
    }

    async fn sign_out(&self) -> Result<()> {
        let Some(token) = self.access_token.read().await.clone() else {
            return Ok(());
        };

        let response = self
            .client
            .post(self.endpoint("auth/v1/logout")?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;
        ensure_success(response).await?;

        *self.access_token.write().await = None;
        tracing::info!("Signed out");
        Ok(())
    }
}
