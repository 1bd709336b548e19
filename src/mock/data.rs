//! Static seed data for the simulated ATS and sync layer.
//!
//! Two tables back the whole scenario: [`ats_jobs`] is the ground truth
//! inside the ATS, [`synced_jobs`] is the sync layer's cached view of the
//! same jobs under its own identifier space. The second synced record is
//! deliberately stale: the ATS archived `green-ats-4822` yesterday, but
//! the sync layer last refreshed three days ago and still reports `open`.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Archived,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::Archived => write!(f, "archived"),
        }
    }
}

/// A job posting as the ATS itself stores it. Immutable ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsJob {
    pub ats_job_id: String,
    pub title: String,
    pub status: JobStatus,
    pub archived_at: Option<DateTime<Utc>>,
    pub company: String,
    pub location: String,
}

/// A job posting as mirrored by the sync layer.
///
/// `internal_id` is the sync layer's own identifier; `remote_id` points at
/// the corresponding [`AtsJob`]. `status` and `last_synced_at` may lag the
/// ATS ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedJob {
    pub internal_id: String,
    pub remote_id: String,
    pub title: String,
    pub status: JobStatus,
    pub last_synced_at: DateTime<Utc>,
}

struct Seed {
    ats: Vec<AtsJob>,
    synced: Vec<SyncedJob>,
}

// Built once per process so archived_at/last_synced_at stay identical
// across lookups within a session.
static SEED: OnceLock<Seed> = OnceLock::new();

fn days_ago(n: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(n)
}

fn build_seed() -> Seed {
    let ats = vec![
        AtsJob {
            ats_job_id: "green-ats-4821".into(),
            title: "Senior Frontend Engineer".into(),
            status: JobStatus::Open,
            archived_at: None,
            company: "Acme Corp".into(),
            location: "Berlin, DE".into(),
        },
        AtsJob {
            ats_job_id: "green-ats-4822".into(),
            title: "Staff Backend Engineer".into(),
            status: JobStatus::Archived,
            archived_at: Some(days_ago(1)),
            company: "Acme Corp".into(),
            location: "Remote, EU".into(),
        },
        AtsJob {
            ats_job_id: "green-ats-4823".into(),
            title: "Product Designer".into(),
            status: JobStatus::Open,
            archived_at: None,
            company: "Acme Corp".into(),
            location: "London, UK".into(),
        },
    ];

    let synced = vec![
        SyncedJob {
            internal_id: "sync-uuid-aa11".into(),
            remote_id: "green-ats-4821".into(),
            title: "Senior Frontend Engineer".into(),
            status: JobStatus::Open,
            last_synced_at: days_ago(0),
        },
        SyncedJob {
            internal_id: "sync-uuid-bb22".into(),
            remote_id: "green-ats-4822".into(),
            title: "Staff Backend Engineer".into(),
            // Stale: the ATS archived this job yesterday, but the last
            // sync ran three days ago.
            status: JobStatus::Open,
            last_synced_at: days_ago(3),
        },
        SyncedJob {
            internal_id: "sync-uuid-cc33".into(),
            remote_id: "green-ats-4823".into(),
            title: "Product Designer".into(),
            status: JobStatus::Open,
            last_synced_at: days_ago(0),
        },
    ];

    Seed { ats, synced }
}

fn seed() -> &'static Seed {
    SEED.get_or_init(build_seed)
}

/// Ground-truth job table as the ATS sees it.
pub fn ats_jobs() -> &'static [AtsJob] {
    &seed().ats
}

/// The sync layer's cached view, in seed order.
pub fn synced_jobs() -> &'static [SyncedJob] {
    &seed().synced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_jobs_on_each_side() {
        assert_eq!(ats_jobs().len(), 3);
        assert_eq!(synced_jobs().len(), 3);
    }

    #[test]
    fn synced_records_map_onto_ats_records() {
        for synced in synced_jobs() {
            let ats = ats_jobs()
                .iter()
                .find(|j| j.ats_job_id == synced.remote_id)
                .unwrap();
            assert_eq!(ats.title, synced.title);
        }
    }

    #[test]
    fn second_job_is_stale() {
        let ats = &ats_jobs()[1];
        let synced = &synced_jobs()[1];

        assert_eq!(ats.status, JobStatus::Archived);
        assert!(ats.archived_at.is_some());
        assert_eq!(synced.status, JobStatus::Open);
        assert!(synced.last_synced_at < ats.archived_at.unwrap());
    }

    #[test]
    fn open_jobs_have_no_archived_at() {
        for job in ats_jobs().iter().filter(|j| j.status == JobStatus::Open) {
            assert!(job.archived_at.is_none());
        }
    }

    #[test]
    fn seed_is_stable_across_calls() {
        let first = ats_jobs()[1].archived_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(ats_jobs()[1].archived_at, first);
    }

    #[test]
    fn job_status_display() {
        assert_eq!(JobStatus::Open.to_string(), "open");
        assert_eq!(JobStatus::Archived.to_string(), "archived");
    }

    #[test]
    fn synced_job_serialization_roundtrip() {
        let job = synced_jobs()[0].clone();
        let json = serde_json::to_string(&job).unwrap();
        let back: SyncedJob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }
}
