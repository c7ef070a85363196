#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! The HTTP request cycle against the chat backend.
//!
//! One `POST /chat` per call, no retries, no state between calls. Every
//! way the round-trip can go wrong is folded into the two-arm failure
//! taxonomy of [`Outcome`]: transport problems and non-success statuses
//! are network failures, answers in the wrong shape are protocol
//! failures. Retrying is a user decision (re-submission), never done here.

use std::time::Duration;

use async_trait::async_trait;
use holochat_core::{ChatBackend, FailureKind, Outcome, SessionIdentity};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

/// Bound on the whole round-trip, so the controller can never stay busy
/// indefinitely when the backend hangs. Overridable through config.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Stateless executor for one chat round-trip.
pub struct RequestCycle {
    client: Client,
    base_url: String,
}

impl RequestCycle {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn with_default_timeout(base_url: String) -> anyhow::Result<Self> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl ChatBackend for RequestCycle {
    async fn send(&self, user_text: &str, identity: &SessionIdentity) -> Outcome {
        let body = json!({
            "message": user_text.trim(),
            "user_id": identity.as_str(),
        });

        debug!("Sending chat request to {}/chat", self.base_url);

        let response = match self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Transport failure talking to the backend: {e}");
                return Outcome::Failure(FailureKind::Network);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Backend answered with status {status}");
            return Outcome::Failure(FailureKind::Network);
        }

        let payload = match response.json::<serde_json::Value>().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Backend response body is not valid JSON: {e}");
                return Outcome::Failure(FailureKind::Protocol);
            }
        };

        payload["reply"].as_str().map_or_else(
            || {
                warn!("Backend response is missing the reply field");
                Outcome::Failure(FailureKind::Protocol)
            },
            |reply| Outcome::Reply(reply.to_string()),
        )
    }
}
