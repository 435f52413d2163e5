use crate::domain::model::Session;
use crate::domain::ports::IdentityProvider;

/// Fetches the current session. Any upstream error is logged and treated as
/// "no session" so the caller can continue anonymously.
pub async fn initialize<I: IdentityProvider + ?Sized>(identity: &I) -> Option<Session> {
    match identity.get_session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Error initializing session: {}", e);
            None
        }
    }
}
