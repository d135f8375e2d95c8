//! # Merai environment state
//!
//! This module defines [`crate::env_state::MeraiEnv`], the **shared environment object** used by
//! every external collaborator of the library (description lookups, IP geolocation).
//!
//! It owns a single blocking [`ureq::Agent`] configured with a **global timeout**, so that a
//! slow remote service resolves to a soft failure after a few seconds instead of hanging the
//! caller. The agent is internally reference counted: cloning a `MeraiEnv` is cheap and every
//! clone shares the same connection pool.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use merai::env_state::MeraiEnv;
//!
//! let env = MeraiEnv::new();
//! let body = env.get_from_url("https://en.wikipedia.org/api/rest_v1/page/summary/Sirius");
//! if let Ok(text) = body {
//!     println!("{}", &text[..100.min(text.len())]);
//! }
//! ```
//!
//! ## See also
//!
//! - [`crate::enrichment::wiki::WikiSummaryClient`] – description and thumbnail lookups.
//! - [`crate::enrichment::geolocation::IpGeoLocator`] – IP based observer location.
use std::{fmt::Debug, time::Duration};
use ureq::Agent;

use crate::{constants::HTTP_TIMEOUT_SECS, merai_errors::MeraiError};

#[derive(Debug, Clone)]
pub struct MeraiEnv {
    pub http_client: Agent,
    timeout: Duration,
}

impl Default for MeraiEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MeraiEnv {
    /// Create an environment with the default HTTP timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
    }

    /// Create an environment whose HTTP agent gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();

        MeraiEnv {
            http_client: agent,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request and return the response body.
    ///
    /// Return
    /// ----------
    /// * `Ok(body)` on a 2xx answer.
    /// * [`MeraiError::ExternalTimeout`] when the global timeout elapsed.
    /// * [`MeraiError::LookupMiss`] when the server answered with an error status.
    /// * [`MeraiError::UreqHttpError`] for any other transport failure.
    pub fn get_from_url(&self, url: &str) -> Result<String, MeraiError> {
        match self.http_client.get(url).call() {
            Ok(mut response) => Ok(response.body_mut().read_to_string()?),
            Err(ureq::Error::Timeout(_)) => Err(MeraiError::ExternalTimeout(url.to_string())),
            Err(ureq::Error::StatusCode(code)) => Err(MeraiError::LookupMiss(format!(
                "{url} answered with HTTP status {code}"
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod test_env_state {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let env = MeraiEnv::default();
        assert_eq!(env.timeout(), Duration::from_secs(5));

        let env = MeraiEnv::with_timeout(Duration::from_millis(250));
        assert_eq!(env.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_unreachable_host_is_an_error() {
        // port 9 on localhost is not served; the call must fail, not hang
        let env = MeraiEnv::with_timeout(Duration::from_millis(500));
        assert!(env.get_from_url("http://127.0.0.1:9/").is_err());
    }
}
