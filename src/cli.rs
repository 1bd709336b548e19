//! Command-line interface, built on clap.
//!
//! Defines the [`Cli`] struct with the [`Command`] subcommands
//! (walkthrough, jobs, submit) and global flags (--latency-ms,
//! --verbose).

use clap::{Parser, Subcommand};

/// synclab — guided simulator for ATS job-sync integration bugs.
#[derive(Debug, Parser)]
#[command(name = "synclab", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Simulated ATS latency in milliseconds (overrides the config file).
    #[arg(long, global = true)]
    pub latency_ms: Option<u64>,

    /// Print full JSON for responses, mappings and payloads.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the guided two-bug debugging walkthrough.
    Walkthrough {
        /// Internal id of the synced job to debug. Defaults to the job
        /// with the stale sync record.
        #[arg(long)]
        job: Option<String>,
    },

    /// List jobs as seen through the sync layer.
    Jobs,

    /// Submit a single application with the given job id against the
    /// mock ATS. Pass an internal id to reproduce the mismatch bug.
    Submit {
        /// Job id to put in the payload (internal or remote).
        job_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_walkthrough_subcommand() {
        let cli = Cli::parse_from(["synclab", "walkthrough", "--job", "sync-uuid-aa11"]);
        match cli.command {
            Command::Walkthrough { job } => {
                assert_eq!(job.unwrap(), "sync-uuid-aa11");
            }
            _ => panic!("expected Walkthrough command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["synclab", "--latency-ms", "0", "--verbose", "jobs"]);
        assert!(cli.verbose);
        assert_eq!(cli.latency_ms, Some(0));
        assert!(matches!(cli.command, Command::Jobs));
    }

    #[test]
    fn cli_parses_submit_subcommand() {
        let cli = Cli::parse_from(["synclab", "submit", "green-ats-4821"]);
        match cli.command {
            Command::Submit { job_id } => {
                assert_eq!(job_id, "green-ats-4821");
            }
            _ => panic!("expected Submit command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
