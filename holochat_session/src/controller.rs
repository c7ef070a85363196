//! Session controller: the `Idle`/`Sending` machine over the transcript.

use holochat_core::{ChatBackend, Message, Outcome, SessionIdentity, Transcript};
use tracing::{debug, info, warn};

/// Seed message shown before any user interaction.
pub const GREETING: &str = "Systems Online. Galactic Archives Accessed. \n\nGreetings. How may I be of assistance to your journey?";

/// Fixed transcript entry for any failed cycle. The failure reason goes
/// to the logs, never to the transcript.
pub const FALLBACK_NOTICE: &str = "CONNECTION LOST. Signal intercepted. Attempt retry.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestState {
    Idle,
    Sending,
}

/// Owns the conversation and mediates exactly one request cycle at a time.
///
/// There is no terminal state: every outcome, success or failure, returns
/// the machine to `Idle` with the transcript still usable. The single-
/// flight invariant lives here — a submission while `Sending` is dropped,
/// not queued.
pub struct SessionController<B> {
    backend: B,
    identity: SessionIdentity,
    transcript: Transcript,
    state: RequestState,
}

impl<B: ChatBackend> SessionController<B> {
    #[must_use]
    pub fn new(backend: B, identity: SessionIdentity) -> Self {
        Self::with_greeting(backend, identity, GREETING)
    }

    #[must_use]
    pub fn with_greeting(backend: B, identity: SessionIdentity, greeting: &str) -> Self {
        Self {
            backend,
            identity,
            transcript: Transcript::seeded(Message::assistant(greeting)),
            state: RequestState::Idle,
        }
    }

    /// Submit user text and drive the cycle to completion.
    ///
    /// Empty (after trimming) input and input arriving while a cycle is
    /// outstanding are dropped silently; both return `false`. Returns
    /// `true` once the cycle has settled and the assistant entry (reply
    /// or fallback notice) is in the transcript.
    pub async fn submit(&mut self, text: &str) -> bool {
        let Some(user_text) = self.begin(text) else {
            return false;
        };

        let outcome = self.backend.send(&user_text, &self.identity).await;
        self.settle(outcome);
        true
    }

    /// Current ordered message sequence, greeting first.
    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        self.transcript.all()
    }

    /// True iff exactly one cycle is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, RequestState::Sending)
    }

    /// `Idle + submit`: accept non-empty input, append the user message,
    /// and move to `Sending`. Anything else is a no-op.
    fn begin(&mut self, text: &str) -> Option<String> {
        if self.state == RequestState::Sending {
            debug!("Submission rejected: a request cycle is already in flight");
            return None;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.transcript.append(Message::user(trimmed));
        self.state = RequestState::Sending;
        info!("Request cycle started ({} chars)", trimmed.len());
        Some(trimmed.to_string())
    }

    /// `Sending + outcome`: append the assistant entry and return to `Idle`.
    fn settle(&mut self, outcome: Outcome) {
        let entry = match outcome {
            Outcome::Reply(reply) => Message::assistant(reply),
            Outcome::Failure(kind) => {
                warn!("Request cycle failed: {kind}");
                Message::assistant(FALLBACK_NOTICE)
            }
        };

        self.transcript.append(entry);
        self.state = RequestState::Idle;
        debug!("Request cycle settled, {} messages", self.transcript.len());
    }
}
