//! Terminal presentation for the debug flow.
//!
//! Uses `indicatif` for spinners while a simulated call is in flight and
//! `console` for colored output. [`FlowDisplay`] renders the state the
//! session exposes; it never mutates it.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::debug_flow::DebugStep;
use crate::logger::{LogEntry, LogLevel};
use crate::mock::{ApplicationPayload, AtsApiResponse, AtsJobStatus, IdMapping, JobStatus, SyncedJob};

/// Renders session state to the terminal.
pub struct FlowDisplay {
    green: Style,
    red: Style,
    yellow: Style,
    cyan: Style,
    dim: Style,
}

impl Default for FlowDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowDisplay {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            cyan: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Spinner shown while a simulated ATS call is in flight.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn step_banner(&self, step: DebugStep) {
        println!();
        println!("{}", self.cyan.apply_to(format!("── {step} ──")));
    }

    pub fn job_list(&self, jobs: &[SyncedJob]) {
        for job in jobs {
            let status = match job.status {
                JobStatus::Open => self.green.apply_to("open"),
                JobStatus::Archived => self.red.apply_to("archived"),
            };
            println!(
                "  {} [{}] {}",
                job.internal_id,
                status,
                job.title,
            );
            println!(
                "    {}",
                self.dim.apply_to(format!(
                    "remote_id: {} | last synced: {}",
                    job.remote_id,
                    job.last_synced_at.format("%Y-%m-%d %H:%M")
                ))
            );
        }
    }

    pub fn response(&self, res: &AtsApiResponse) {
        let marker = if res.success {
            self.green.apply_to("✓")
        } else {
            self.red.apply_to("✗")
        };
        println!("  {marker} {}", res.message);
        if let Some(data) = &res.data {
            if let Some(app_id) = &data.application_id {
                println!("    {}", self.dim.apply_to(format!("application_id: {app_id}")));
            }
            if let Some(at) = data.archived_at {
                println!(
                    "    {}",
                    self.dim.apply_to(format!("archived_at: {}", at.to_rfc3339()))
                );
            }
        }
    }

    pub fn payload(&self, payload: &ApplicationPayload) {
        println!(
            "  job_id           {}",
            self.yellow.apply_to(&payload.job_id)
        );
        println!("  candidate_name   {}", payload.candidate_name);
        println!("  candidate_email  {}", payload.candidate_email);
    }

    pub fn mapping(&self, mapping: &IdMapping) {
        println!(
            "  internal_id  {}",
            self.yellow.apply_to(&mapping.internal_id)
        );
        println!(
            "  remote_id    {}",
            self.yellow
                .apply_to(mapping.remote_id.as_deref().unwrap_or("<none>"))
        );
        match &mapping.ats_job {
            Some(job) => println!(
                "  ats_job      {} ({}, {})",
                job.title, job.company, job.location
            ),
            None => println!("  ats_job      {}", self.red.apply_to("<not found>")),
        }
    }

    /// Prints the ground-truth status and, when the synced copy
    /// disagrees, the stale-data warning that is the point of the lesson.
    pub fn status(&self, status: &AtsJobStatus, synced: Option<&SyncedJob>) {
        if !status.found {
            println!(
                "  {} ATS job {} not found",
                self.red.apply_to("✗"),
                status.ats_job_id
            );
            return;
        }
        let status_str = status
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".into());
        println!("  ATS job {}: status={}", status.ats_job_id, status_str);
        if let Some(at) = status.archived_at {
            println!(
                "    {}",
                self.dim.apply_to(format!("archived_at: {}", at.to_rfc3339()))
            );
        }
        if let Some(synced) = synced
            && status.status == Some(JobStatus::Archived)
            && synced.status == JobStatus::Open
        {
            println!(
                "  {} Sync layer still reports \"open\" (last synced {})",
                self.yellow.apply_to("⚠ stale data:"),
                synced.last_synced_at.format("%Y-%m-%d %H:%M")
            );
        }
    }

    pub fn logs(&self, entries: &[LogEntry]) {
        for entry in entries {
            let level = match entry.level {
                LogLevel::Info => self.dim.apply_to("info   "),
                LogLevel::Warn => self.yellow.apply_to("warn   "),
                LogLevel::Error => self.red.apply_to("error  "),
                LogLevel::Success => self.green.apply_to("success"),
            };
            println!("  {} {} {}", self.dim.apply_to(&entry.timestamp), level, entry.message);
            if let Some(detail) = &entry.detail {
                println!("    {}", self.dim.apply_to(detail));
            }
        }
    }

    pub fn lesson(&self, text: &str) {
        println!("  {}", self.yellow.apply_to(text));
    }

    pub fn done(&self, text: &str) {
        println!("  {} {text}", self.green.apply_to("✓"));
    }
}
