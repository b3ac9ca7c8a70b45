use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use strum::VariantArray;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    Delivery, DeliveryError, DeliveryFailure, Field, FormState, Locale, Strategy, TemplateParams,
    ValidationErrors, mailto, validate,
};

/// Delay before the dialog closes itself after a hosted delivery succeeded.
pub const HOSTED_AUTO_CLOSE: Duration = Duration::from_secs(2);

/// Longer delay for the mailto fallback so the visitor can read the note.
pub const MAILTO_AUTO_CLOSE: Duration = Duration::from_secs(5);

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success(Option<String>),
    Error(Option<String>),
}

impl SubmissionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success(_) => "success",
            SubmissionStatus::Error(_) => "error",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Success(detail) | SubmissionStatus::Error(detail) => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, SubmissionStatus::Sending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The dialog is not open; nothing happened.
    Closed,
    /// A submission is already in flight; nothing happened.
    Busy,
    /// The form failed validation and no delivery was attempted.
    Invalid(ValidationErrors),
    /// The hosted service accepted the message.
    Delivered,
    /// The browser has to be sent to this `mailto:` URI.
    Navigate(String),
    Failed(DeliveryError),
    /// The dialog was closed while the delivery was in flight.
    Discarded,
}

/// Copy of a dialog's state for rendering.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub open: bool,
    pub form: FormState,
    pub errors: ValidationErrors,
    pub status: SubmissionStatus,
    pub mailto: Option<String>,
    pub auto_close: Option<Duration>,
}

#[derive(Default)]
struct DialogState {
    open: bool,
    form: FormState,
    errors: ValidationErrors,
    status: SubmissionStatus,
    mailto: Option<String>,
    auto_close: Option<Duration>,
    // Bumped on every open/close so late results and timers can tell they
    // belong to a dialog that no longer exists.
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl DialogState {
    fn reset(&mut self, open: bool) {
        self.open = open;
        self.form = FormState::default();
        self.errors = ValidationErrors::default();
        self.status = SubmissionStatus::Idle;
        self.mailto = None;
        self.auto_close = None;
        self.generation += 1;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// One visitor's contact dialog.
///
/// Cloning hands out another handle to the same dialog.
#[derive(Clone)]
pub struct ContactDialog {
    state: Arc<Mutex<DialogState>>,
    delivery: Arc<Delivery>,
}

impl ContactDialog {
    pub fn new(delivery: Arc<Delivery>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DialogState::default())),
            delivery,
        }
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Opens the dialog with an empty form. Reopening an open dialog keeps it.
    pub async fn open(&self) {
        let mut state = self.state.lock().await;
        if state.open {
            return;
        }

        state.cancel_timer();
        state.reset(true);
    }

    /// Closes the dialog and forgets everything typed into it.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.cancel_timer();
        state.reset(false);
    }

    pub async fn is_open(&self) -> bool {
        self.state.lock().await.open
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().await;

        Snapshot {
            open: state.open,
            form: state.form.clone(),
            errors: state.errors.clone(),
            status: state.status.clone(),
            mailto: state.mailto.clone(),
            auto_close: state.auto_close,
        }
    }

    /// Applies one keystroke-level edit and clears that field's error only.
    pub async fn edit(&self, field: Field, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        if !state.open {
            return;
        }

        state.form.set(field, value);
        state.errors.remove(field);
    }

    /// Replaces the whole form, as a posted HTML form does, then submits it.
    pub async fn submit_form(&self, form: FormState, locale: Locale) -> SubmitOutcome {
        {
            let mut state = self.state.lock().await;
            if !state.open {
                return SubmitOutcome::Closed;
            }
            if state.status.is_sending() {
                return SubmitOutcome::Busy;
            }

            for field in Field::VARIANTS {
                if state.form.get(*field) != form.get(*field) {
                    state.errors.remove(*field);
                }
            }
            state.form = form;
        }

        self.submit(locale).await
    }

    #[tracing::instrument(skip(self), fields(hosted = self.delivery.is_hosted()))]
    pub async fn submit(&self, locale: Locale) -> SubmitOutcome {
        let (form, generation) = {
            let mut state = self.state.lock().await;
            if !state.open {
                return SubmitOutcome::Closed;
            }
            if state.status.is_sending() {
                return SubmitOutcome::Busy;
            }

            let errors = validate(&state.form);
            if !errors.is_empty() {
                tracing::debug!(invalid = errors.len(), "contact form rejected by validation");
                state.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }

            state.errors = ValidationErrors::default();
            state.status = SubmissionStatus::Sending;
            state.mailto = None;

            (state.form.clone(), state.generation)
        };

        match self.delivery.strategy() {
            Strategy::Mailto => {
                let recipient = self.delivery.recipient();
                let uri = mailto::uri(recipient, &form, locale);
                let note = mailto::opened_note(recipient, locale);

                tracing::info!("hosted delivery not configured, handing over to the mail client");

                self.succeed(generation, Some(note), Some(uri.clone()), MAILTO_AUTO_CLOSE)
                    .await
                    .unwrap_or(SubmitOutcome::Navigate(uri))
            }
            Strategy::Hosted { service, config } => {
                let params = TemplateParams::new(&form, self.delivery.recipient());
                let result = service
                    .send(
                        &config.service_id,
                        &config.template_id,
                        &params,
                        &config.public_key,
                    )
                    .await;

                match result {
                    Ok(200) => {
                        tracing::info!("contact message delivered");

                        self.succeed(generation, None, None, HOSTED_AUTO_CLOSE)
                            .await
                            .unwrap_or(SubmitOutcome::Delivered)
                    }
                    Ok(status) => {
                        self.fail(generation, DeliveryFailure::status(status), locale)
                            .await
                    }
                    Err(failure) => self.fail(generation, failure, locale).await,
                }
            }
        }
    }

    /// Records a success and schedules the auto-close. Returns `Some` with
    /// the outcome to report when the result has to be dropped instead.
    async fn succeed(
        &self,
        generation: u64,
        detail: Option<String>,
        mailto: Option<String>,
        delay: Duration,
    ) -> Option<SubmitOutcome> {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            return Some(SubmitOutcome::Discarded);
        }

        state.form = FormState::default();
        state.status = SubmissionStatus::Success(detail);
        state.mailto = mailto;
        state.auto_close = Some(delay);
        state.cancel_timer();
        state.timer = Some(spawn_auto_close(
            Arc::downgrade(&self.state),
            generation,
            delay,
        ));

        None
    }

    async fn fail(&self, generation: u64, failure: DeliveryFailure, locale: Locale) -> SubmitOutcome {
        let error = DeliveryError::classify(&failure);

        tracing::warn!(
            status = ?failure.status,
            classified = ?error,
            "contact message could not be delivered"
        );

        let mut state = self.state.lock().await;
        if state.generation != generation {
            return SubmitOutcome::Discarded;
        }

        state.status = SubmissionStatus::Error(Some(error.message(locale)));

        SubmitOutcome::Failed(error)
    }
}

fn spawn_auto_close(
    state: Weak<Mutex<DialogState>>,
    generation: u64,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let Some(state) = state.upgrade() else {
            return;
        };

        let mut state = state.lock().await;
        if state.generation == generation {
            state.timer = None;
            state.reset(false);
            tracing::debug!(after = ?delay, "contact dialog closed itself");
        }
    })
}
