//! Simulated sync-layer/ATS backend.
//!
//! [`MockAtsService`] implements the [`AtsGateway`] contract against the
//! static seed tables, sleeping a configurable latency before each reply
//! to mimic a network round trip. The submit path encodes the two bugs
//! the simulator teaches: an unknown job id (the caller passed an
//! internal id where the ATS wants its own id) and an archived job whose
//! synced copy still looks open.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use uuid::Uuid;

use super::data::{self, AtsJob, JobStatus, SyncedJob};

/// Why the ATS rejected a submission. Carried explicitly so callers
/// branch on a discriminant instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownJobId,
    JobArchived,
}

/// An application request as the sync layer sends it to the ATS.
/// `job_id` is the field under test: passing an internal id here is Bug #1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub job_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
}

/// Optional payload attached to an [`AtsApiResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

/// Response envelope returned by every ATS-facing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsApiResponse {
    pub status: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl AtsApiResponse {
    pub fn rejected_as_archived(&self) -> bool {
        self.reason == Some(RejectReason::JobArchived)
    }
}

/// How one internal id resolves through the sync layer to the ATS.
/// Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdMapping {
    pub internal_id: String,
    pub remote_id: Option<String>,
    pub ats_job: Option<AtsJob>,
}

/// Ground-truth status of a job straight from the ATS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsJobStatus {
    pub found: bool,
    pub ats_job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// The four operations the debug flow needs from the backend.
///
/// The contract the simulator teaches lives in these signatures and the
/// response shapes, so any implementation must preserve them verbatim.
#[allow(async_fn_in_trait)]
pub trait AtsGateway {
    async fn get_synced_jobs(&self) -> Vec<SyncedJob>;
    async fn submit_application(&self, payload: &ApplicationPayload) -> AtsApiResponse;
    async fn lookup_id_mapping(&self, internal_id: &str) -> IdMapping;
    async fn check_job_status(&self, ats_job_id: &str) -> AtsJobStatus;
}

/// In-memory [`AtsGateway`] over the seed tables.
pub struct MockAtsService {
    /// Latency for the submit/list round trip.
    submit_latency: Duration,
    /// Latency for the lighter debug lookups.
    lookup_latency: Duration,
}

impl MockAtsService {
    pub const DEFAULT_SUBMIT_LATENCY_MS: u64 = 600;
    pub const DEFAULT_LOOKUP_LATENCY_MS: u64 = 300;

    pub fn new(submit_latency: Duration, lookup_latency: Duration) -> Self {
        Self {
            submit_latency,
            lookup_latency,
        }
    }

    /// Zero-latency service for tests and scripted runs.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for MockAtsService {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(Self::DEFAULT_SUBMIT_LATENCY_MS),
            Duration::from_millis(Self::DEFAULT_LOOKUP_LATENCY_MS),
        )
    }
}

fn new_application_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("app-{}", &id[..6])
}

impl AtsGateway for MockAtsService {
    async fn get_synced_jobs(&self) -> Vec<SyncedJob> {
        sleep(self.submit_latency).await;
        data::synced_jobs().to_vec()
    }

    async fn submit_application(&self, payload: &ApplicationPayload) -> AtsApiResponse {
        sleep(self.submit_latency).await;

        // The ATS only knows its own ids. Non-existence is checked
        // before archival.
        let Some(job) = data::ats_jobs()
            .iter()
            .find(|j| j.ats_job_id == payload.job_id)
        else {
            return AtsApiResponse {
                status: 200,
                success: false,
                message: format!("Invalid job_id: no job found for id \"{}\"", payload.job_id),
                reason: Some(RejectReason::UnknownJobId),
                data: None,
            };
        };

        if job.status == JobStatus::Archived {
            return AtsApiResponse {
                status: 200,
                success: false,
                message: format!(
                    "Job \"{}\" ({}) is archived and no longer accepting applications.",
                    job.title, job.ats_job_id
                ),
                reason: Some(RejectReason::JobArchived),
                data: Some(ResponseData {
                    archived_at: job.archived_at,
                    ..Default::default()
                }),
            };
        }

        AtsApiResponse {
            status: 200,
            success: true,
            message: format!("Application for \"{}\" submitted successfully.", job.title),
            reason: None,
            data: Some(ResponseData {
                application_id: Some(new_application_id()),
                ..Default::default()
            }),
        }
    }

    async fn lookup_id_mapping(&self, internal_id: &str) -> IdMapping {
        sleep(self.lookup_latency).await;

        let Some(synced) = data::synced_jobs()
            .iter()
            .find(|j| j.internal_id == internal_id)
        else {
            return IdMapping {
                internal_id: internal_id.to_string(),
                remote_id: None,
                ats_job: None,
            };
        };

        let ats_job = data::ats_jobs()
            .iter()
            .find(|j| j.ats_job_id == synced.remote_id)
            .cloned();

        IdMapping {
            internal_id: internal_id.to_string(),
            remote_id: Some(synced.remote_id.clone()),
            ats_job,
        }
    }

    async fn check_job_status(&self, ats_job_id: &str) -> AtsJobStatus {
        sleep(self.lookup_latency).await;

        match data::ats_jobs().iter().find(|j| j.ats_job_id == ats_job_id) {
            None => AtsJobStatus {
                found: false,
                ats_job_id: ats_job_id.to_string(),
                status: None,
                archived_at: None,
            },
            Some(job) => AtsJobStatus {
                found: true,
                ats_job_id: ats_job_id.to_string(),
                status: Some(job.status),
                archived_at: job.archived_at,
            },
        }
    }
}
