mod cli;
mod config;
mod debug_flow;
mod error;
mod logger;
mod mock;
mod ui;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};
use config::SynclabConfig;
use debug_flow::{DebugSession, DebugStep};
use error::SynclabError;
use mock::{ApplicationPayload, AtsGateway, MockAtsService};
use ui::FlowDisplay;

/// Internal id of the seed job whose sync record is stale; the default
/// walkthrough target because it reproduces both bugs.
const STALE_JOB_ID: &str = "sync-uuid-bb22";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = SynclabConfig::load()?;
    if let Some(ms) = cli.latency_ms {
        config.latency_ms = ms;
        config.lookup_latency_ms = ms.min(config.lookup_latency_ms);
    }

    match cli.command {
        Command::Walkthrough { job } => run_walkthrough(&config, job.as_deref(), cli.verbose).await,
        Command::Jobs => run_jobs(&config).await,
        Command::Submit { job_id } => run_submit(&config, &job_id, cli.verbose).await,
    }
}

fn service_from(config: &SynclabConfig) -> MockAtsService {
    MockAtsService::new(
        Duration::from_millis(config.latency_ms),
        Duration::from_millis(config.lookup_latency_ms),
    )
}

async fn run_jobs(config: &SynclabConfig) -> Result<()> {
    let ui = FlowDisplay::new();
    let service = service_from(config);

    let pb = ui.spinner("Fetching synced jobs...");
    let jobs = service.get_synced_jobs().await;
    pb.finish_and_clear();

    ui.job_list(&jobs);
    Ok(())
}

async fn run_submit(config: &SynclabConfig, job_id: &str, verbose: bool) -> Result<()> {
    let ui = FlowDisplay::new();
    let service = service_from(config);

    let payload = ApplicationPayload {
        job_id: job_id.to_string(),
        candidate_name: config.candidate_name.clone(),
        candidate_email: config.candidate_email.clone(),
    };

    let pb = ui.spinner("POST /ats/applications ...");
    let response = service.submit_application(&payload).await;
    pb.finish_and_clear();

    ui.response(&response);
    if verbose {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

/// The scripted lesson: reproduce the identifier mismatch, trace it,
/// uncover the stale sync record behind it, fix the payload, and run
/// into the archived-job rejection.
async fn run_walkthrough(config: &SynclabConfig, job: Option<&str>, verbose: bool) -> Result<()> {
    let ui = FlowDisplay::new();
    let service = service_from(config);
    let mut session = DebugSession::with_candidate(
        service,
        config.candidate_name.clone(),
        config.candidate_email.clone(),
    );

    let pb = ui.spinner("Fetching synced jobs...");
    let jobs = session.synced_jobs().await;
    pb.finish_and_clear();

    let target_id = job.unwrap_or(STALE_JOB_ID);
    let target = jobs
        .iter()
        .find(|j| j.internal_id == target_id)
        .cloned()
        .ok_or_else(|| SynclabError::JobNotFound(target_id.to_string()))?;

    ui.step_banner(DebugStep::Start);
    ui.job_list(&jobs);
    session.select_job(target.clone());

    // Submit with the id the sync layer handed us.
    let pb = ui.spinner("Submitting application...");
    session.submit().await;
    pb.finish_and_clear();
    ui.step_banner(session.state().step);
    if let Some(res) = &session.state().last_response {
        ui.response(res);
        if verbose {
            println!("{}", serde_json::to_string_pretty(res)?);
        }
    }

    session.advance_step(DebugStep::ViewLogs);
    ui.step_banner(DebugStep::ViewLogs);
    ui.logs(session.logs());

    session.advance_step(DebugStep::InspectPayload);
    ui.step_banner(DebugStep::InspectPayload);
    if let Some(payload) = &session.state().last_payload {
        ui.payload(payload);
        ui.lesson("The payload carries the sync layer's internal id, not an ATS id.");
    }

    let pb = ui.spinner("Tracing id mapping...");
    session.trace_ids().await;
    pb.finish_and_clear();
    ui.step_banner(DebugStep::TraceIds);
    if let Some(mapping) = &session.state().id_mapping {
        ui.mapping(mapping);
        if verbose {
            println!("{}", serde_json::to_string_pretty(mapping)?);
        }
    }

    let pb = ui.spinner("Checking job status in the ATS...");
    session.check_status().await;
    pb.finish_and_clear();
    ui.step_banner(DebugStep::CheckStatus);
    if let Some(status) = &session.state().ats_status {
        ui.status(status, session.state().selected_job.as_ref());
    }

    session.apply_fix();
    ui.step_banner(DebugStep::ApplyFix);
    ui.done("Payload construction switched to remote_id.");

    session.advance_step(DebugStep::Resubmit);
    let pb = ui.spinner("Resubmitting application...");
    session.submit().await;
    pb.finish_and_clear();
    ui.step_banner(session.state().step);
    if let Some(res) = &session.state().last_response {
        ui.response(res);
    }

    if session.state().step == DebugStep::HandleArchived {
        ui.lesson(
            "Right id this time, but the ATS archived the job while the sync \
             layer still shows it open. Wait for the next sync or trigger one.",
        );
        session.advance_step(DebugStep::Resolved);
        ui.step_banner(DebugStep::Resolved);
    }

    ui.done("Both failure causes diagnosed.");
    ui.logs(session.logs());

    Ok(())
}
