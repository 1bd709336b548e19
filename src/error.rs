use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynclabError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("No synced job found for id: {0}")]
    JobNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_not_found_names_the_id() {
        let err = SynclabError::JobNotFound("sync-uuid-zz99".into());
        assert_eq!(
            err.to_string(),
            "No synced job found for id: sync-uuid-zz99"
        );
    }

    #[test]
    fn toml_errors_convert() {
        let parse_err = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let err: SynclabError = parse_err.into();
        assert!(err.to_string().starts_with("TOML parse error"));
    }
}
