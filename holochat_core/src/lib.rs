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

//! Shared vocabulary for the holochat client.
//!
//! Everything the session controller, request cycle, and identity store
//! agree on lives here: message values, the transcript, the outcome of a
//! request cycle, and the backend seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod transcript;

pub use transcript::Transcript;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the transcript. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Opaque token identifying this client across requests.
///
/// The format is whatever the identity store handed out; nothing in the
/// client inspects it beyond non-emptiness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionIdentity(String);

impl SessionIdentity {
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a request cycle could not produce a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// Transport-level failure: unreachable endpoint, timeout, reset, or a
    /// non-success response status.
    #[error("network failure")]
    Network,
    /// The backend answered, but not in the expected shape.
    #[error("protocol failure")]
    Protocol,
}

/// Result of one request cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Failure(FailureKind),
}

/// The seam between the session controller and the remote service.
///
/// Implementations are stateless request logic: one call, one classified
/// outcome, no retries. Failures are part of the outcome rather than an
/// error channel so the controller handles both arms the same way.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, user_text: &str, identity: &SessionIdentity) -> Outcome;
}
