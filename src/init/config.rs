use std::time::Duration;

use anyhow::anyhow;
use reqwest::Url;

use crate::{
    engine::run_load::LoadProfile,
    errors::code_error::{CodeError, LoadTestResult, code_err},
};

pub const DEFAULT_TARGET_URL: &str = "https://my-staging.domain/signup";
pub const DEFAULT_VUS: u64 = 20;
/// Upper bound on concurrent virtual users in one run.
pub const MAX_VUS: u64 = 100_000;
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);
pub const DEFAULT_ITERATION_PAUSE: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target_url: Url,
    pub vus: u64,
    pub duration: Duration,
    pub iteration_pause: Duration,
    pub request_timeout: Duration,
}

impl RunConfig {
    pub fn new(
        target_url: &str,
        vus: u64,
        duration: Duration,
        iteration_pause: Duration,
        request_timeout: Duration,
    ) -> LoadTestResult<Self> {
        let target_url = Url::parse(target_url.trim()).map_err(|e| {
            code_err(
                CodeError::CONFIG_INVALID,
                anyhow!("target URL '{target_url}' is not a valid URL: {e}"),
            )
        })?;

        if !matches!(target_url.scheme(), "http" | "https") {
            return Err(code_err(
                CodeError::CONFIG_INVALID,
                anyhow!(
                    "target URL must use http or https, got '{}'",
                    target_url.scheme()
                ),
            ));
        }

        if vus == 0 {
            return Err(code_err(
                CodeError::CONFIG_INVALID,
                anyhow!("vus must be at least 1"),
            ));
        }

        if vus > MAX_VUS {
            return Err(code_err(
                CodeError::CONFIG_INVALID,
                anyhow!("vus must be at most {MAX_VUS}, got {vus}"),
            ));
        }

        if duration.is_zero() {
            return Err(code_err(
                CodeError::CONFIG_INVALID,
                anyhow!("duration must be greater than zero"),
            ));
        }

        if request_timeout.is_zero() {
            return Err(code_err(
                CodeError::CONFIG_INVALID,
                anyhow!("request timeout must be greater than zero"),
            ));
        }

        Ok(RunConfig {
            target_url,
            vus,
            duration,
            iteration_pause,
            request_timeout,
        })
    }

    pub fn load_profile(&self) -> LoadProfile {
        LoadProfile {
            vus: self.vus,
            duration: self.duration,
            iteration_pause: self.iteration_pause,
        }
    }
}
