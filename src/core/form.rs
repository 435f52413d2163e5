use crate::domain::model::{ClientField, Draft, FormStatus, IntakeDraft, IntakeField, PetField};
use crate::utils::error::{IntakeError, Result};
use std::time::Duration;
use tokio::sync::mpsc;

/// What the form asks of its container once a submission has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSignal {
    Close,
    Stay,
}

/// 表單狀態控制器：持有草稿、狀態與錯誤訊息
#[derive(Debug)]
pub struct FormController<D: Draft> {
    draft: D,
    status: FormStatus,
    error: Option<String>,
    watchers: Vec<mpsc::UnboundedSender<FormStatus>>,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> FormController<D> {
    pub fn new() -> Self {
        Self {
            draft: D::default(),
            status: FormStatus::Idle,
            error: None,
            watchers: Vec::new(),
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Message shown inline after a failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == FormStatus::Loading
    }

    /// Receives every status transition from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<FormStatus> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers.push(tx);
        rx
    }

    pub fn set_field(&mut self, field: D::Field, value: impl Into<String>) {
        self.draft.set_field(field, value.into());
    }

    pub fn reset(&mut self) {
        self.draft = D::default();
        self.error = None;
        self.transition(FormStatus::Idle);
    }

    /// Marks the form as loading and hands back an immutable snapshot of the draft.
    pub(crate) fn begin_submit(&mut self) -> Result<D> {
        if self.is_loading() {
            return Err(IntakeError::SubmissionInFlight);
        }
        self.error = None;
        self.transition(FormStatus::Loading);
        Ok(self.draft.clone())
    }

    pub(crate) fn succeed(&mut self) {
        self.error = None;
        self.transition(FormStatus::Success);
    }

    /// Empties the draft but keeps the current status visible.
    pub(crate) fn clear_draft(&mut self) {
        self.draft = D::default();
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.transition(FormStatus::Error);
    }

    /// Keeps a successful form on screen for `delay`, then clears it and asks
    /// the container to close. Any other status leaves the form open.
    pub async fn close_after(&mut self, delay: Duration) -> FormSignal {
        if self.status != FormStatus::Success {
            return FormSignal::Stay;
        }
        tokio::time::sleep(delay).await;
        self.reset();
        FormSignal::Close
    }

    fn transition(&mut self, status: FormStatus) {
        self.status = status;
        self.watchers.retain(|tx| tx.send(status).is_ok());
    }
}

/// 精靈步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Client,
    Pet,
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Client => 1,
            WizardStep::Pet => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Client => "Add New Client",
            WizardStep::Pet => "Add Pet Information",
        }
    }
}

/// Two-step client intake: client details first, then the pet.
#[derive(Debug, Default)]
pub struct IntakeWizard {
    form: FormController<IntakeDraft>,
    step: WizardStep,
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormController<IntakeDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController<IntakeDraft> {
        &mut self.form
    }

    pub fn set_client_field(&mut self, field: ClientField, value: impl Into<String>) {
        self.form.set_field(IntakeField::Client(field), value);
    }

    pub fn set_pet_field(&mut self, field: PetField, value: impl Into<String>) {
        self.form.set_field(IntakeField::Pet(field), value);
    }

    /// Moves to the pet step. Client fields are not checked here; the
    /// submission checks both drafts before writing anything.
    pub fn advance_step(&mut self) {
        if self.step == WizardStep::Client {
            tracing::debug!("Wizard advanced to step {}", WizardStep::Pet.index());
            self.step = WizardStep::Pet;
        }
    }

    pub fn retreat_step(&mut self) {
        if self.step == WizardStep::Pet {
            tracing::debug!("Wizard returned to step {}", WizardStep::Client.index());
            self.step = WizardStep::Client;
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.step = WizardStep::Client;
    }

    /// Discards both drafts after a completed intake. Only a successful
    /// wizard closes.
    pub fn close(&mut self) -> FormSignal {
        if self.form.status() != FormStatus::Success {
            return FormSignal::Stay;
        }
        self.reset();
        FormSignal::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookingDraft, BookingField};

    #[test]
    fn set_field_never_validates() {
        let mut form = FormController::<BookingDraft>::new();
        form.set_field(BookingField::Email, "definitely not an email");
        assert_eq!(form.draft().email, "definitely not an email");
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn reset_restores_defaults_and_clears_status() {
        let mut form = FormController::<BookingDraft>::new();
        form.set_field(BookingField::ServiceType, "daycare");
        form.begin_submit().unwrap();
        form.fail("Failed to submit booking. Please try again.");

        form.reset();
        assert_eq!(form.draft(), &BookingDraft::default());
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn second_submit_while_loading_is_refused() {
        let mut form = FormController::<BookingDraft>::new();
        form.begin_submit().unwrap();
        assert!(matches!(form.begin_submit(), Err(IntakeError::SubmissionInFlight)));
        assert!(form.is_loading());
    }

    #[test]
    fn wizard_step_is_bounded() {
        let mut wizard = IntakeWizard::new();
        assert_eq!(wizard.step().index(), 1);

        wizard.retreat_step();
        assert_eq!(wizard.step(), WizardStep::Client);

        wizard.advance_step();
        wizard.advance_step();
        assert_eq!(wizard.step().index(), 2);

        wizard.retreat_step();
        assert_eq!(wizard.step(), WizardStep::Client);
    }

    #[test]
    fn wizard_advances_without_client_details() {
        let mut wizard = IntakeWizard::new();
        wizard.advance_step();
        assert_eq!(wizard.step(), WizardStep::Pet);
        assert!(wizard.form().draft().client.name.is_empty());
    }

    #[test]
    fn wizard_reset_returns_to_first_step() {
        let mut wizard = IntakeWizard::new();
        wizard.set_client_field(ClientField::Name, "Pat Lee");
        wizard.set_pet_field(PetField::Age, "4");
        wizard.advance_step();

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::Client);
        assert_eq!(wizard.form().draft(), &IntakeDraft::default());
    }

    #[test]
    fn wizard_close_only_after_success() {
        let mut wizard = IntakeWizard::new();
        wizard.set_client_field(ClientField::Name, "Pat Lee");
        wizard.advance_step();
        assert_eq!(wizard.close(), FormSignal::Stay);
        assert_eq!(wizard.step(), WizardStep::Pet);

        wizard.form_mut().begin_submit().unwrap();
        wizard.form_mut().succeed();
        assert_eq!(wizard.close(), FormSignal::Close);
        assert_eq!(wizard.step(), WizardStep::Client);
        assert_eq!(wizard.form().draft(), &IntakeDraft::default());
        assert_eq!(wizard.form().status(), FormStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn close_after_waits_then_resets() {
        let mut form = FormController::<BookingDraft>::new();
        form.set_field(BookingField::Name, "Jamie");
        form.begin_submit().unwrap();
        form.succeed();

        let started = tokio::time::Instant::now();
        let signal = form.close_after(Duration::from_secs(2)).await;

        assert_eq!(signal, FormSignal::Close);
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(form.draft(), &BookingDraft::default());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[tokio::test]
    async fn close_after_keeps_failed_form_open() {
        let mut form = FormController::<BookingDraft>::new();
        form.set_field(BookingField::Name, "Jamie");
        form.begin_submit().unwrap();
        form.fail("nope");

        assert_eq!(form.close_after(Duration::from_secs(2)).await, FormSignal::Stay);
        assert_eq!(form.draft().name, "Jamie");
        assert_eq!(form.error(), Some("nope"));
    }
}
