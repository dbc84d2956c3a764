use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use crate::config::FormSettings;
use crate::dto::job_post_dto::{
    Field, FieldBinding, FieldChange, FormErrors, SubmissionContext, SubmitOutcome,
};
use crate::error::{Error, Result};
use crate::models::job_post::JobPostDraft;
use crate::models::select_option::{OptionCatalog, OptionKind, SelectOption};
use crate::services::assembly_service::{
    assemble_record, company_label, AssemblyContext, BlobCalendar,
};
use crate::services::binding_service::{bind, reduce};
use crate::services::job_creator::JobCreator;
use crate::services::option_source::OptionSource;
use crate::utils::time::now;
use crate::utils::validation::validate_draft;

/// Where a form stands in the submission lifecycle.
///
/// `Idle`, `IdleWithErrors` and `IdleWithMessage` accept input; the other
/// phases only exist while a submit call is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    IdleWithErrors,
    Assembling,
    Submitting,
    IdleWithMessage,
}

impl SubmissionPhase {
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            SubmissionPhase::Validating | SubmissionPhase::Assembling | SubmissionPhase::Submitting
        )
    }
}

#[derive(Debug, Default)]
struct FormState {
    draft: JobPostDraft,
    errors: FormErrors,
    form_error: Option<String>,
    backend_message: Option<String>,
    phase: SubmissionPhase,
    catalog: OptionCatalog,
}

fn lock_state(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn transition(state: &mut FormState, next: SubmissionPhase) {
    debug!(from = ?state.phase, to = ?next, "Submission phase change");
    state.phase = next;
}

// Resets the phase if a submit future is dropped mid-flight.
struct InFlightGuard<'a> {
    state: &'a Mutex<FormState>,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock_state(self.state);
        if state.phase == SubmissionPhase::Submitting {
            warn!("Job post submission abandoned before the backend answered");
            state.backend_message = Some("Submission cancelled".to_string());
            transition(&mut state, SubmissionPhase::IdleWithMessage);
        }
    }
}

pub struct JobPostForm<C> {
    creator: C,
    settings: FormSettings,
    state: Mutex<FormState>,
}

impl<C: JobCreator> JobPostForm<C> {
    pub fn new(creator: C, settings: FormSettings) -> Self {
        Self {
            creator,
            settings,
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock_state(&self.state)
    }

    fn lock_editable(&self) -> Result<MutexGuard<'_, FormState>> {
        let state = self.lock();
        if state.phase.is_busy() {
            return Err(Error::SubmissionInFlight);
        }
        Ok(state)
    }

    /// Applies one input event. Refused while a submission is in flight.
    pub fn apply(&self, change: FieldChange) -> Result<()> {
        let mut state = self.lock_editable()?;
        let draft = std::mem::take(&mut state.draft);
        state.draft = reduce(draft, change);
        Ok(())
    }

    pub fn load_draft(&self, draft: JobPostDraft) -> Result<()> {
        self.lock_editable()?.draft = draft;
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        let mut state = self.lock_editable()?;
        state.draft = JobPostDraft::default();
        state.errors = FormErrors::new();
        state.form_error = None;
        state.backend_message = None;
        transition(&mut state, SubmissionPhase::Idle);
        Ok(())
    }

    pub fn draft(&self) -> JobPostDraft {
        self.lock().draft.clone()
    }

    pub fn binding(&self, field: Field) -> FieldBinding {
        let state = self.lock();
        bind(&state.draft, &state.errors, field)
    }

    pub fn bindings(&self) -> Vec<FieldBinding> {
        let state = self.lock();
        Field::ALL
            .into_iter()
            .map(|field| bind(&state.draft, &state.errors, field))
            .collect()
    }

    pub fn errors(&self) -> FormErrors {
        self.lock().errors.clone()
    }

    pub fn form_error(&self) -> Option<String> {
        self.lock().form_error.clone()
    }

    pub fn backend_message(&self) -> Option<String> {
        self.lock().backend_message.clone()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lock().phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase().is_busy()
    }

    pub fn options(&self, kind: OptionKind) -> Vec<SelectOption> {
        self.lock().catalog.get(kind).to_vec()
    }

    #[instrument(skip(self, source))]
    pub async fn refresh_options(&self, kind: OptionKind, source: &dyn OptionSource) -> Result<usize> {
        let options = match source.fetch_options().await {
            Ok(options) => options,
            Err(err) => {
                warn!(error = %err, "Failed to refresh select options");
                return Err(err);
            }
        };
        let count = options.len();
        self.lock().catalog.replace(kind, options);
        info!(count, "Select options refreshed");
        Ok(count)
    }

    pub async fn submit(&self, ctx: &SubmissionContext) -> Result<SubmitOutcome> {
        self.submit_at(ctx, now()).await
    }

    /// Validates, assembles and sends the current draft, using `now` for
    /// both timestamps and the blob.
    #[instrument(skip(self, ctx), fields(curator = ctx.curator.as_ref().map(|c| c.id)))]
    pub async fn submit_at(
        &self,
        ctx: &SubmissionContext,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome> {
        let record = {
            let mut state = self.lock();
            if state.phase.is_busy() {
                warn!("Refusing a second submission while one is in flight");
                return Err(Error::SubmissionInFlight);
            }

            transition(&mut state, SubmissionPhase::Validating);
            if let Err(errors) = validate_draft(&state.draft) {
                info!(fields = %errors, "Job post rejected by validation");
                state.errors = errors.clone();
                transition(&mut state, SubmissionPhase::IdleWithErrors);
                return Ok(SubmitOutcome::Rejected(errors));
            }
            state.errors = FormErrors::new();

            transition(&mut state, SubmissionPhase::Assembling);
            let label = state
                .draft
                .company
                .as_ref()
                .map(|company| company_label(company, &state.catalog))
                .unwrap_or_default();
            let assembled = assemble_record(
                &state.draft,
                &AssemblyContext {
                    curator: ctx.curator.as_ref(),
                    curator_role: &self.settings.curator_role,
                    indicated_by: ctx.indicated_by,
                    company_label: &label,
                    now,
                    calendar: BlobCalendar {
                        locale: self.settings.blob_locale,
                        offset: self.settings.blob_offset,
                    },
                },
            );
            let record = match assembled {
                Ok(record) => record,
                Err(err) => {
                    warn!(error = %err, "Job post submission blocked");
                    state.form_error = Some(err.to_string());
                    transition(&mut state, SubmissionPhase::IdleWithMessage);
                    return Err(err);
                }
            };

            state.form_error = None;
            state.backend_message = Some(self.settings.pending_message.clone());
            transition(&mut state, SubmissionPhase::Submitting);
            record
        };

        let guard = InFlightGuard {
            state: &self.state,
            armed: true,
        };
        let result = match self.settings.create_timeout {
            Some(limit) => tokio::time::timeout(limit, self.creator.create_job(&record))
                .await
                .unwrap_or(Err(Error::Timeout(limit))),
            None => self.creator.create_job(&record).await,
        };
        guard.disarm();

        let mut state = self.lock();
        let outcome = match result {
            Ok(message) if message == self.settings.success_message => {
                info!(blob = %record.blob(), "Job post created");
                state.draft = JobPostDraft::default();
                state.errors = FormErrors::new();
                state.form_error = None;
                state.backend_message = Some(message.clone());
                transition(&mut state, SubmissionPhase::Idle);
                SubmitOutcome::Succeeded { record, message }
            }
            Ok(message) => {
                warn!(%message, "Backend did not confirm the job post");
                state.backend_message = Some(message.clone());
                transition(&mut state, SubmissionPhase::IdleWithMessage);
                SubmitOutcome::Failed { message }
            }
            Err(err) => {
                error!(error = %err, "Job post creation failed");
                let message = err.to_string();
                state.backend_message = Some(message.clone());
                transition(&mut state, SubmissionPhase::IdleWithMessage);
                SubmitOutcome::Failed { message }
            }
        };
        Ok(outcome)
    }
}
