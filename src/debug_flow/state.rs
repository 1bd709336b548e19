//! The debug-flow state machine.
//!
//! A session walks through [`DebugStep`]s by dispatching
//! [`DebugFlowAction`]s against a pure reducer: given a state and an
//! action, [`reduce`] deterministically produces the next state. All
//! asynchronous work (service calls) happens outside the reducer in
//! [`DebugSession`](super::session::DebugSession), which dispatches a
//! completion action once a call resolves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mock::{ApplicationPayload, AtsApiResponse, AtsJobStatus, IdMapping, SyncedJob};

/// The steps of the guided debugging lesson, in intended traversal order.
///
/// `HandleArchived` is an alternate branch reached from a failed submit
/// whose reason is archival; it converges back to `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebugStep {
    Start,
    Submitted,
    ViewLogs,
    InspectPayload,
    TraceIds,
    CheckStatus,
    ApplyFix,
    Resubmit,
    HandleArchived,
    Resolved,
}

impl fmt::Display for DebugStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DebugStep::Start => "start",
            DebugStep::Submitted => "submitted",
            DebugStep::ViewLogs => "view-logs",
            DebugStep::InspectPayload => "inspect-payload",
            DebugStep::TraceIds => "trace-ids",
            DebugStep::CheckStatus => "check-status",
            DebugStep::ApplyFix => "apply-fix",
            DebugStep::Resubmit => "resubmit",
            DebugStep::HandleArchived => "handle-archived",
            DebugStep::Resolved => "resolved",
        };
        write!(f, "{s}")
    }
}

/// Everything a session accumulates while debugging.
///
/// Mutated only through [`reduce`]; discarded on reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugFlowState {
    pub step: DebugStep,
    pub selected_job: Option<SyncedJob>,
    pub last_response: Option<AtsApiResponse>,
    pub last_payload: Option<ApplicationPayload>,
    pub id_mapping: Option<IdMapping>,
    pub ats_status: Option<AtsJobStatus>,
    /// False until the fix is applied; afterwards payloads always use
    /// the remote id. Only a reset clears it.
    pub use_fixed_id: bool,
    pub loading: bool,
}

impl Default for DebugFlowState {
    fn default() -> Self {
        Self {
            step: DebugStep::Start,
            selected_job: None,
            last_response: None,
            last_payload: None,
            id_mapping: None,
            ats_status: None,
            use_fixed_id: false,
            loading: false,
        }
    }
}

/// Actions the session can dispatch. Completion actions carry the data
/// fetched by the corresponding service call.
#[derive(Debug, Clone)]
pub enum DebugFlowAction {
    SelectJob(SyncedJob),
    SetLoading,
    SubmitSuccess {
        response: AtsApiResponse,
        payload: ApplicationPayload,
    },
    SubmitFailure {
        response: AtsApiResponse,
        payload: ApplicationPayload,
    },
    TraceIdsComplete(IdMapping),
    CheckStatusComplete(AtsJobStatus),
    AdvanceStep(DebugStep),
    ApplyFix,
    Reset,
}

/// Pure transition function of the debug flow.
pub fn reduce(state: &DebugFlowState, action: DebugFlowAction) -> DebugFlowState {
    match action {
        DebugFlowAction::SelectJob(job) => {
            // Guards against mid-flow re-selection.
            if state.step != DebugStep::Start {
                return state.clone();
            }
            DebugFlowState {
                selected_job: Some(job),
                ..state.clone()
            }
        }

        DebugFlowAction::SetLoading => DebugFlowState {
            loading: true,
            ..state.clone()
        },

        DebugFlowAction::SubmitSuccess { response, payload } => DebugFlowState {
            last_response: Some(response),
            last_payload: Some(payload),
            loading: false,
            step: DebugStep::Resolved,
            ..state.clone()
        },

        DebugFlowAction::SubmitFailure { response, payload } => {
            let step = if response.rejected_as_archived() {
                DebugStep::HandleArchived
            } else {
                DebugStep::Submitted
            };
            DebugFlowState {
                last_response: Some(response),
                last_payload: Some(payload),
                loading: false,
                step,
                ..state.clone()
            }
        }

        DebugFlowAction::TraceIdsComplete(mapping) => DebugFlowState {
            id_mapping: Some(mapping),
            loading: false,
            step: DebugStep::TraceIds,
            ..state.clone()
        },

        DebugFlowAction::CheckStatusComplete(status) => DebugFlowState {
            ats_status: Some(status),
            loading: false,
            step: DebugStep::CheckStatus,
            ..state.clone()
        },

        DebugFlowAction::AdvanceStep(step) => DebugFlowState {
            step,
            ..state.clone()
        },

        DebugFlowAction::ApplyFix => DebugFlowState {
            use_fixed_id: true,
            step: DebugStep::ApplyFix,
            ..state.clone()
        },

        DebugFlowAction::Reset => DebugFlowState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RejectReason, data};

    fn selected() -> DebugFlowState {
        reduce(
            &DebugFlowState::default(),
            DebugFlowAction::SelectJob(data::synced_jobs()[1].clone()),
        )
    }

    fn failure(reason: RejectReason) -> AtsApiResponse {
        AtsApiResponse {
            status: 200,
            success: false,
            message: "rejected".into(),
            reason: Some(reason),
            data: None,
        }
    }

    fn payload() -> ApplicationPayload {
        ApplicationPayload {
            job_id: "sync-uuid-bb22".into(),
            candidate_name: "Jane Doe".into(),
            candidate_email: "jane@example.com".into(),
        }
    }

    #[test]
    fn select_job_only_from_start() {
        let state = selected();
        assert_eq!(
            state.selected_job.as_ref().unwrap().internal_id,
            "sync-uuid-bb22"
        );

        let mid_flow = DebugFlowState {
            step: DebugStep::TraceIds,
            ..state.clone()
        };
        let after = reduce(
            &mid_flow,
            DebugFlowAction::SelectJob(data::synced_jobs()[0].clone()),
        );
        assert_eq!(after, mid_flow);
    }

    #[test]
    fn submit_failure_routes_on_reason_not_message() {
        let state = selected();

        let after = reduce(
            &state,
            DebugFlowAction::SubmitFailure {
                response: failure(RejectReason::UnknownJobId),
                payload: payload(),
            },
        );
        assert_eq!(after.step, DebugStep::Submitted);

        // Same message text, different reason, different branch.
        let after = reduce(
            &state,
            DebugFlowAction::SubmitFailure {
                response: failure(RejectReason::JobArchived),
                payload: payload(),
            },
        );
        assert_eq!(after.step, DebugStep::HandleArchived);
        assert!(!after.loading);
        assert!(after.last_response.is_some());
        assert!(after.last_payload.is_some());
    }

    #[test]
    fn submit_success_resolves() {
        let state = reduce(&selected(), DebugFlowAction::SetLoading);
        assert!(state.loading);

        let response = AtsApiResponse {
            status: 200,
            success: true,
            message: "ok".into(),
            reason: None,
            data: None,
        };
        let after = reduce(
            &state,
            DebugFlowAction::SubmitSuccess {
                response,
                payload: payload(),
            },
        );
        assert_eq!(after.step, DebugStep::Resolved);
        assert!(!after.loading);
    }

    #[test]
    fn apply_fix_sets_flag_and_step() {
        let after = reduce(&selected(), DebugFlowAction::ApplyFix);
        assert!(after.use_fixed_id);
        assert_eq!(after.step, DebugStep::ApplyFix);

        // Nothing short of a reset clears the flag.
        let after = reduce(&after, DebugFlowAction::AdvanceStep(DebugStep::Resubmit));
        assert!(after.use_fixed_id);
    }

    #[test]
    fn reset_restores_initial_state_from_anywhere() {
        let mut state = selected();
        state = reduce(&state, DebugFlowAction::ApplyFix);
        state = reduce(
            &state,
            DebugFlowAction::SubmitFailure {
                response: failure(RejectReason::JobArchived),
                payload: payload(),
            },
        );
        assert_ne!(state, DebugFlowState::default());

        let after = reduce(&state, DebugFlowAction::Reset);
        assert_eq!(after, DebugFlowState::default());
    }

    #[test]
    fn advance_step_is_unconditional() {
        let after = reduce(
            &DebugFlowState::default(),
            DebugFlowAction::AdvanceStep(DebugStep::ViewLogs),
        );
        assert_eq!(after.step, DebugStep::ViewLogs);
    }

    #[test]
    fn step_display_matches_kebab_case() {
        assert_eq!(DebugStep::Start.to_string(), "start");
        assert_eq!(DebugStep::ViewLogs.to_string(), "view-logs");
        assert_eq!(DebugStep::HandleArchived.to_string(), "handle-archived");
        assert_eq!(
            serde_json::to_string(&DebugStep::InspectPayload).unwrap(),
            "\"inspect-payload\""
        );
    }
}
