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

//! Persistent anonymous identity for the client.
//!
//! One token per storage scope, generated lazily on first use and reused
//! for every request afterwards. Storage is a single file; if the file
//! cannot be read or written the store degrades to a token that lives
//! only for the current process.

use std::fs;
use std::io;
use std::path::PathBuf;

use holochat_core::SessionIdentity;
use tracing::{info, warn};
use uuid::Uuid;

/// File-backed store for the anonymous identity token.
///
/// Construct one per process and keep it around: the token is cached
/// after the first `get_or_create` call, so repeated calls always return
/// the same identity even when storage is unavailable.
#[derive(Debug)]
pub struct IdentityStore {
    path: PathBuf,
    cached: Option<SessionIdentity>,
}

impl IdentityStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path, cached: None }
    }

    /// Return the stored identity, generating and persisting a fresh one
    /// on first-ever use.
    ///
    /// A stored value is returned verbatim as long as it is non-empty; no
    /// format check is applied, so tokens written by older or newer
    /// versions of the client keep working. Storage failures are logged
    /// and answered with an ephemeral token instead of an error.
    pub fn get_or_create(&mut self) -> SessionIdentity {
        if let Some(identity) = &self.cached {
            return identity.clone();
        }

        let identity = self.load_or_generate();
        self.cached = Some(identity.clone());
        identity
    }

    /// Forget the persisted token so the next call mints a new identity.
    pub fn reset(&mut self) -> io::Result<()> {
        self.cached = None;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared stored identity at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn load_or_generate(&self) -> SessionIdentity {
        match fs::read_to_string(&self.path) {
            Ok(stored) => {
                let token = stored.trim();
                if !token.is_empty() {
                    return SessionIdentity::new(token.to_string());
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!("Could not read identity file {}: {e}", self.path.display());
            }
        }

        let token = Uuid::new_v4().to_string();
        if let Err(e) = self.persist(&token) {
            warn!(
                "Identity storage unavailable ({e}); using a token that will \
                 not survive this process"
            );
        } else {
            info!("Generated new identity at {}", self.path.display());
        }

        SessionIdentity::new(token)
    }

    fn persist(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> IdentityStore {
        IdentityStore::new(dir.path().join("user_id"))
    }

    #[test]
    fn fresh_scope_generates_and_persists_a_token() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let identity = store.get_or_create();
        assert!(!identity.as_str().is_empty());

        let on_disk = fs::read_to_string(dir.path().join("user_id")).unwrap();
        assert_eq!(on_disk, identity.as_str());
    }

    #[test]
    fn repeated_calls_return_the_same_token() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let first = store.get_or_create();
        let second = store.get_or_create();
        assert_eq!(first, second);
    }

    #[test]
    fn a_second_store_in_the_same_scope_sees_the_same_token() {
        let dir = TempDir::new().unwrap();
        let first = store_in(&dir).get_or_create();
        let second = store_in(&dir).get_or_create();
        assert_eq!(first, second);
    }

    #[test]
    fn stored_value_is_returned_verbatim_without_validation() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("user_id"), "legacy-format-token-42").unwrap();

        let identity = store_in(&dir).get_or_create();
        assert_eq!(identity.as_str(), "legacy-format-token-42");
    }

    #[test]
    fn empty_stored_value_is_replaced() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("user_id"), "   \n").unwrap();

        let identity = store_in(&dir).get_or_create();
        assert!(!identity.as_str().is_empty());
    }

    #[test]
    fn unwritable_storage_degrades_to_a_stable_ephemeral_token() {
        let dir = TempDir::new().unwrap();
        // A path whose parent is a regular file cannot be created.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = IdentityStore::new(blocker.join("user_id"));
        let first = store.get_or_create();
        let second = store.get_or_create();

        assert!(!first.as_str().is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn reset_clears_the_stored_token() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let before = store.get_or_create();
        store.reset().unwrap();
        let after = store.get_or_create();

        assert_ne!(before, after);
        assert!(dir.path().join("user_id").exists());
    }

    #[test]
    fn reset_on_a_fresh_scope_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).reset().unwrap();
    }
}
