//! Explicit session state: bearer token plus the cached account record.
//!
//! The session is owned by the [`ApiClient`](crate::client::ApiClient) and
//! every endpoint reads or updates it through this type. Optionally the token
//! is mirrored to a file so a later process can resume the session.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{AuthResponse, User};

#[derive(Default)]
struct SessionState {
    token: Option<SecretString>,
    user: Option<User>,
}

/// Authentication state shared by all endpoint wrappers.
#[derive(Default)]
pub struct Session {
    state: RwLock<SessionState>,
    token_file: Option<PathBuf>,
}

impl Session {
    /// An empty, memory-only session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A memory-only session seeded with an existing token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.write().token = Some(SecretString::from(token.into()));
        session
    }

    /// A session whose token is persisted at `path`.
    ///
    /// If the file already holds a token it is loaded; the user record is
    /// not, and must be fetched again with `/auth/me`.
    pub fn persistent<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let token = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let raw = raw.trim();
            (!raw.is_empty()).then(|| SecretString::from(raw.to_string()))
        } else {
            None
        };
        debug!(path = %path.display(), restored = token.is_some(), "opened session file");
        Ok(Self {
            state: RwLock::new(SessionState { token, user: None }),
            token_file: Some(path),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// `Authorization` header value for the current token.
    pub(crate) fn bearer(&self) -> Option<String> {
        self.read()
            .token
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    /// Run `f` with the raw token, if any.
    pub fn with_token_str<T>(&self, f: impl FnOnce(Option<&str>) -> T) -> T {
        let state = self.read();
        f(state.token.as_ref().map(|t| t.expose_secret()))
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn set_user(&self, user: User) {
        self.write().user = Some(user);
    }

    /// Replace the token, keeping whatever user is cached.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.persist_token(Some(&token));
        self.write().token = Some(SecretString::from(token));
    }

    /// Install the token and user from a successful credential exchange.
    pub fn set_auth(&self, auth: AuthResponse) {
        self.persist_token(Some(&auth.token));
        let mut state = self.write();
        state.token = Some(SecretString::from(auth.token));
        state.user = Some(auth.user);
    }

    pub fn mark_onboarding_completed(&self) {
        if let Some(user) = self.write().user.as_mut() {
            user.onboarding_completed = true;
        }
    }

    /// Drop the token and the cached user.
    pub fn clear(&self) {
        self.persist_token(None);
        let mut state = self.write();
        state.token = None;
        state.user = None;
    }

    fn persist_token(&self, token: Option<&str>) {
        let Some(path) = &self.token_file else {
            return;
        };
        let outcome = match token {
            Some(t) => path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|_| fs::write(path, t)),
            None if path.exists() => fs::remove_file(path),
            None => Ok(()),
        };
        if let Err(e) = outcome {
            warn!(path = %path.display(), error = %e, "failed to persist session token");
        }
    }
}
