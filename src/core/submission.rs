use crate::core::form::{FormController, FormSignal, IntakeWizard};
use crate::core::schema;
use crate::domain::model::{
    BookingDraft, Collection, ContactDraft, CreatedRecord, IntakeDraft, NewBooking, Notification,
    RecordId, ValidBooking,
};
use crate::domain::ports::{Notifier, RecordStore};
use crate::utils::error::{IntakeError, Result};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;

pub const BOOKING_FAILURE_MESSAGE: &str = "Failed to submit booking. Please try again.";
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    /// How long a confirmed booking stays on screen before the form resets.
    pub reset_delay: Duration,
    pub primary_recipient: String,
    pub support_recipient: String,
    /// Delete the client record again when the pet write fails.
    pub rollback_on_partial_failure: bool,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_millis(2000),
            primary_recipient: "info@littlepawsjax.com".to_string(),
            support_recipient: "support@littlepawsjax.com".to_string(),
            rollback_on_partial_failure: true,
        }
    }
}

pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub booking: ValidBooking,
    pub record: CreatedRecord,
}

#[derive(Debug, Clone)]
pub struct IntakeReceipt {
    pub client_id: RecordId,
    pub pet_id: RecordId,
    pub signal: FormSignal,
}

/// 送出流程：驗證草稿、依序寫入後端，再把結果回寫到表單狀態
pub struct IntakeService<S: RecordStore, N: Notifier> {
    store: S,
    notifier: N,
    settings: SubmissionSettings,
    today: Clock,
}

impl<S: RecordStore, N: Notifier> IntakeService<S, N> {
    pub fn new(store: S, notifier: N, settings: SubmissionSettings) -> Self {
        Self {
            store,
            notifier,
            settings,
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Overrides the source of "today" used for the start-date rule.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(clock);
        self
    }

    pub fn settings(&self) -> &SubmissionSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Validates the booking draft and writes one pending booking.
    ///
    /// Validation failures are shown verbatim and never reach the network.
    /// Upstream failures are logged and replaced by a generic message.
    pub async fn submit_booking(
        &self,
        form: &mut FormController<BookingDraft>,
    ) -> Result<BookingReceipt> {
        let draft = form.begin_submit()?;

        match self.book(&draft).await {
            Ok(receipt) => {
                tracing::info!("✅ Booking {} stored with status pending", receipt.record.id);
                form.succeed();
                Ok(receipt)
            }
            Err(err) => {
                let message = match &err {
                    IntakeError::Validation { message } => {
                        tracing::warn!("Booking rejected: {}", message);
                        message.clone()
                    }
                    other => {
                        tracing::error!("❌ Booking error: {} (category: {:?})", other, other.category());
                        BOOKING_FAILURE_MESSAGE.to_string()
                    }
                };
                form.fail(message);
                Err(err)
            }
        }
    }

    async fn book(&self, draft: &BookingDraft) -> Result<BookingReceipt> {
        let booking = schema::parse_booking(draft, (self.today)())?;
        let row = serde_json::to_value(NewBooking::from(booking.clone()))?;

        tracing::debug!("Inserting booking for {}", booking.start_date);
        let record = self.store.insert(Collection::Bookings, row).await?;
        Ok(BookingReceipt { booking, record })
    }

    /// Writes the client, then the pet linked to the new client id.
    ///
    /// The pet write only starts after the client write succeeded. Upstream
    /// messages are shown verbatim. A successful intake clears the wizard and
    /// asks its container to close.
    pub async fn submit_intake(&self, wizard: &mut IntakeWizard) -> Result<IntakeReceipt> {
        let draft = wizard.form_mut().begin_submit()?;

        match self.enroll(&draft).await {
            Ok((client_id, pet_id)) => {
                tracing::info!("✅ Client {} and pet {} added", client_id, pet_id);
                wizard.form_mut().succeed();
                Ok(IntakeReceipt {
                    client_id,
                    pet_id,
                    signal: wizard.close(),
                })
            }
            Err(err) => {
                tracing::error!("❌ Error adding client/pet: {}", err);
                wizard.form_mut().fail(err.to_string());
                Err(err)
            }
        }
    }

    async fn enroll(&self, draft: &IntakeDraft) -> Result<(RecordId, RecordId)> {
        let client = schema::parse_client(draft)?;
        let pet = schema::parse_pet(draft)?;

        let client_row = serde_json::to_value(&client)?;
        let created_client = self.store.insert(Collection::Clients, client_row).await?;
        let client_id = created_client.id;

        let pet_row = serde_json::to_value(pet.owned_by(client_id.clone()))?;
        match self.store.insert(Collection::Pets, pet_row).await {
            Ok(created_pet) => Ok((client_id, created_pet.id)),
            Err(err) => {
                self.compensate(&client_id).await;
                Err(IntakeError::PartialFailure {
                    client_id: client_id.to_string(),
                    message: err.to_string(),
                })
            }
        }
    }

    async fn compensate(&self, client_id: &RecordId) {
        if !self.settings.rollback_on_partial_failure {
            tracing::warn!("⚠️ Client {} stored without a pet record", client_id);
            return;
        }

        match self.store.delete(Collection::Clients, client_id).await {
            Ok(()) => tracing::warn!("↩️ Rolled back client {} after pet write failed", client_id),
            Err(e) => tracing::error!(
                "❌ Rollback of client {} failed, record remains: {}",
                client_id,
                e
            ),
        }
    }

    /// Sends the contact message to the primary address, then a copy to support.
    pub async fn submit_contact(&self, form: &mut FormController<ContactDraft>) -> Result<()> {
        let draft = form.begin_submit()?;

        match self.notify(&draft).await {
            Ok(()) => {
                tracing::info!("✅ Contact message from {} delivered", draft.email);
                form.succeed();
                form.clear_draft();
                Ok(())
            }
            Err(err) => {
                tracing::error!("❌ Error sending message: {}", err);
                let message = match &err {
                    IntakeError::Validation { message } => message.clone(),
                    _ => CONTACT_FAILURE_MESSAGE.to_string(),
                };
                form.fail(message);
                Err(err)
            }
        }
    }

    async fn notify(&self, draft: &ContactDraft) -> Result<()> {
        let contact = schema::parse_contact(draft)?;
        let content = render_contact(&contact);

        let primary = Notification {
            to: self.settings.primary_recipient.clone(),
            subject: format!("New Message from {}", contact.name),
            content: content.clone(),
        };
        self.notifier.send(&primary).await?;

        let copy = Notification {
            to: self.settings.support_recipient.clone(),
            subject: format!("[COPY] New Message from {}", contact.name),
            content,
        };
        self.notifier.send(&copy).await
    }
}

pub fn render_contact(contact: &ContactDraft) -> String {
    format!(
        "Name: {}\nEmail: {}\nMessage: {}",
        contact.name, contact.email, contact.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_content_lists_each_field() {
        let content = render_contact(&ContactDraft {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            message: "Do you walk two dogs at once?".into(),
        });
        assert_eq!(
            content,
            "Name: Jo\nEmail: jo@example.com\nMessage: Do you walk two dogs at once?"
        );
    }

    #[test]
    fn default_settings_match_published_addresses() {
        let settings = SubmissionSettings::default();
        assert_eq!(settings.reset_delay, Duration::from_secs(2));
        assert_eq!(settings.primary_recipient, "info@littlepawsjax.com");
        assert_eq!(settings.support_recipient, "support@littlepawsjax.com");
        assert!(settings.rollback_on_partial_failure);
    }
}
