use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

const DEFAULT_JUDGE_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_JUDGE_MODEL: &str = "gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Startup fails if the judge credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub judge_api_url: String,
    pub judge_model: String,
    pub judge_timeout_secs: u64,
    /// Directory scanned for job-description PDFs in ranking mode.
    pub jd_dir: PathBuf,
    pub rank_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            judge_api_url: optional_env("JUDGE_API_URL", DEFAULT_JUDGE_API_URL),
            judge_model: optional_env("JUDGE_MODEL", DEFAULT_JUDGE_MODEL),
            judge_timeout_secs: optional_env("JUDGE_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("JUDGE_TIMEOUT_SECS must be a whole number of seconds")?,
            jd_dir: PathBuf::from(optional_env("JD_DIR", "job_descriptions")),
            rank_concurrency: optional_env("RANK_CONCURRENCY", "1")
                .parse::<usize>()
                .context("RANK_CONCURRENCY must be a positive integer")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            !self.openai_api_key.trim().is_empty(),
            "OPENAI_API_KEY must not be empty"
        );
        ensure!(self.rank_concurrency >= 1, "RANK_CONCURRENCY must be at least 1");
        ensure!(self.judge_timeout_secs >= 1, "JUDGE_TIMEOUT_SECS must be at least 1");
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Config pointing the judge at `judge_api_url`, for tests that never read the environment.
    pub fn for_tests(judge_api_url: &str, jd_dir: PathBuf) -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            judge_api_url: judge_api_url.to_string(),
            judge_model: DEFAULT_JUDGE_MODEL.to_string(),
            judge_timeout_secs: 5,
            jd_dir,
            rank_concurrency: 1,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
