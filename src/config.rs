//! Configuration loaded from `synclab.toml`.
//!
//! All fields have defaults, so the file is optional. The
//! `SYNCLAB_LATENCY_MS` environment variable takes precedence over the
//! file for the submit latency.

use std::path::Path;

use serde::Deserialize;

use crate::error::SynclabError;

/// Top-level configuration for a simulator run.
#[derive(Debug, Clone, Deserialize)]
pub struct SynclabConfig {
    /// Simulated latency for submit/list calls, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Simulated latency for the lighter debug lookups, in milliseconds.
    #[serde(default = "default_lookup_latency_ms")]
    pub lookup_latency_ms: u64,

    /// Candidate identity used for every submitted application.
    #[serde(default = "default_candidate_name")]
    pub candidate_name: String,

    #[serde(default = "default_candidate_email")]
    pub candidate_email: String,
}

fn default_latency_ms() -> u64 {
    600
}

fn default_lookup_latency_ms() -> u64 {
    300
}

fn default_candidate_name() -> String {
    "Jane Doe".to_string()
}

fn default_candidate_email() -> String {
    "jane@example.com".to_string()
}

impl Default for SynclabConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            lookup_latency_ms: default_lookup_latency_ms(),
            candidate_name: default_candidate_name(),
            candidate_email: default_candidate_email(),
        }
    }
}

impl SynclabConfig {
    /// Load from `synclab.toml` in the current directory, falling back
    /// to defaults when the file does not exist.
    pub fn load() -> Result<Self, SynclabError> {
        Self::load_from(Path::new("synclab.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, SynclabError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<SynclabConfig>(&contents)?
        } else {
            Self::default()
        };

        // Environment variable takes precedence over the file.
        if let Ok(raw) = std::env::var("SYNCLAB_LATENCY_MS")
            && !raw.is_empty()
        {
            config.latency_ms = raw.parse().map_err(|_| {
                SynclabError::Config(format!(
                    "SYNCLAB_LATENCY_MS must be an integer, got \"{raw}\""
                ))
            })?;
        }

        Ok(config)
    }
}
