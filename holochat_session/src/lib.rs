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

//! The observable interaction state machine of the client.
//!
//! A [`SessionController`] owns the transcript and cycles between `Idle`
//! and `Sending` for the life of the session. It is the only writer of
//! conversation state; the presentation layer just triggers submissions
//! and reads the transcript and busy flag back.

mod controller;

pub use controller::{FALLBACK_NOTICE, GREETING, SessionController};
