//! Drives a debugging session: owns the flow state, the gateway, and the
//! session log, and exposes the operations a front end dispatches.

use crate::logger::{LogLevel, SessionLogger};
use crate::mock::{ApplicationPayload, AtsGateway, SyncedJob};

use super::state::{DebugFlowAction, DebugFlowState, DebugStep, reduce};

pub const DEFAULT_CANDIDATE_NAME: &str = "Jane Doe";
pub const DEFAULT_CANDIDATE_EMAIL: &str = "jane@example.com";

/// One user's walk through the debug flow.
///
/// Operations with unmet preconditions (no job selected, no mapping yet)
/// are silent no-ops. Every async operation captures the session epoch
/// before awaiting the gateway and drops its completion if a reset bumped
/// the epoch in the meantime, so a stale reply can never leak into a
/// fresh session.
pub struct DebugSession<G: AtsGateway> {
    gateway: G,
    logger: SessionLogger,
    state: DebugFlowState,
    candidate_name: String,
    candidate_email: String,
    epoch: u64,
}

impl<G: AtsGateway> DebugSession<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_candidate(
            gateway,
            DEFAULT_CANDIDATE_NAME.into(),
            DEFAULT_CANDIDATE_EMAIL.into(),
        )
    }

    pub fn with_candidate(gateway: G, candidate_name: String, candidate_email: String) -> Self {
        Self {
            gateway,
            logger: SessionLogger::new(),
            state: DebugFlowState::default(),
            candidate_name,
            candidate_email,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &DebugFlowState {
        &self.state
    }

    /// The sync layer's view of the job board, for rendering.
    pub async fn synced_jobs(&self) -> Vec<SyncedJob> {
        self.gateway.get_synced_jobs().await
    }

    pub fn logs(&self) -> &[crate::logger::LogEntry] {
        self.logger.entries()
    }

    fn dispatch(&mut self, action: DebugFlowAction) {
        self.state = reduce(&self.state, action);
    }

    /// Pick the job to debug. Ignored once the flow has left `start`.
    pub fn select_job(&mut self, job: SyncedJob) {
        if self.state.step != DebugStep::Start {
            return;
        }
        self.logger.log(
            LogLevel::Info,
            format!("Selected: {}", job.title),
            Some(format!("internal_id: {}", job.internal_id)),
        );
        self.dispatch(DebugFlowAction::SelectJob(job));
    }

    /// Submit an application for the selected job.
    ///
    /// Uses the internal id until the fix has been applied, then the
    /// remote id. This is the bug surface: the first submit reproduces
    /// the identifier mismatch, the fixed resubmit runs into the
    /// archived job.
    pub async fn submit(&mut self) {
        let Some(job) = self.state.selected_job.clone() else {
            return;
        };
        let epoch = self.epoch;
        self.dispatch(DebugFlowAction::SetLoading);

        let job_id = if self.state.use_fixed_id {
            job.remote_id.clone()
        } else {
            job.internal_id.clone()
        };
        let payload = ApplicationPayload {
            job_id: job_id.clone(),
            candidate_name: self.candidate_name.clone(),
            candidate_email: self.candidate_email.clone(),
        };

        self.logger.log(
            LogLevel::Info,
            "POST /ats/applications",
            Some(format!("job_id: {job_id}")),
        );

        let response = self.gateway.submit_application(&payload).await;
        if epoch != self.epoch {
            return;
        }

        if response.success {
            self.logger.log(
                LogLevel::Success,
                "Application submitted successfully",
                Some(response.message.clone()),
            );
            self.dispatch(DebugFlowAction::SubmitSuccess { response, payload });
        } else {
            self.logger.log(
                LogLevel::Error,
                format!("Request failed: {}", response.message),
                None,
            );
            self.dispatch(DebugFlowAction::SubmitFailure { response, payload });
        }
    }

    /// Trace how the selected job's internal id maps to the ATS.
    pub async fn trace_ids(&mut self) {
        let Some(job) = self.state.selected_job.clone() else {
            return;
        };
        let epoch = self.epoch;
        self.dispatch(DebugFlowAction::SetLoading);

        let mapping = self.gateway.lookup_id_mapping(&job.internal_id).await;
        if epoch != self.epoch {
            return;
        }

        self.logger.log(
            LogLevel::Warn,
            format!(
                "ID mapping: internal_id={} → remote_id={}",
                mapping.internal_id,
                mapping.remote_id.as_deref().unwrap_or("<none>")
            ),
            Some(format!("ATS job found: {}", mapping.ats_job.is_some())),
        );
        self.dispatch(DebugFlowAction::TraceIdsComplete(mapping));
    }

    /// Ask the ATS for the ground-truth status of the mapped job.
    pub async fn check_status(&mut self) {
        let Some(remote_id) = self
            .state
            .id_mapping
            .as_ref()
            .and_then(|m| m.remote_id.clone())
        else {
            return;
        };
        let epoch = self.epoch;
        self.dispatch(DebugFlowAction::SetLoading);

        let status = self.gateway.check_job_status(&remote_id).await;
        if epoch != self.epoch {
            return;
        }

        if status.found {
            let archived = status.status == Some(crate::mock::JobStatus::Archived);
            let level = if archived {
                LogLevel::Warn
            } else {
                LogLevel::Info
            };
            let status_str = status
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".into());
            self.logger.log(
                level,
                format!("ATS job {}: status={}", status.ats_job_id, status_str),
                status
                    .archived_at
                    .map(|at| format!("Archived at: {}", at.to_rfc3339())),
            );
        } else {
            self.logger.log(
                LogLevel::Error,
                format!("ATS job {} not found", status.ats_job_id),
                None,
            );
        }
        self.dispatch(DebugFlowAction::CheckStatusComplete(status));
    }

    /// Switch payload construction over to the remote id.
    pub fn apply_fix(&mut self) {
        self.logger.log(
            LogLevel::Success,
            "Fix applied: now using remote_id instead of internal_id",
            None,
        );
        self.dispatch(DebugFlowAction::ApplyFix);
    }

    /// Manual transition for steps that carry no data fetch.
    pub fn advance_step(&mut self, step: DebugStep) {
        self.dispatch(DebugFlowAction::AdvanceStep(step));
    }

    /// Back to the initial state with an empty log. Bumps the epoch so
    /// any in-flight call from the previous session is discarded on
    /// completion.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.dispatch(DebugFlowAction::Reset);
        self.logger.clear();
        self.logger
            .log(LogLevel::Info, "Session reset, pick a new job", None);
    }
}
