use crate::domain::model::{Collection, CreatedRecord, Notification, RecordId, Session};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Record persistence in the hosted backend.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts one row and returns it with its generated identifier.
    async fn insert(&self, collection: Collection, record: serde_json::Value) -> Result<CreatedRecord>;

    async fn delete(&self, collection: Collection, id: &RecordId) -> Result<()>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn get_session(&self) -> Result<Option<Session>>;

    async fn sign_out(&self) -> Result<()>;
}
