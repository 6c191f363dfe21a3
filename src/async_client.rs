//! Async wrapper around [`VeriqoSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! payment poller in particular sleeps between attempts and must never run
//! on an async worker thread.
//!
//! # Example
//!
//! ```no_run
//! use veriqo_sdk::AsyncVeriqoSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncVeriqoSdk::builder().build().await.unwrap();
//!
//!     sdk.run(|s| s.auth().login("shopper@example.com", "hunter2")).await.unwrap();
//!     let history = sdk.run(|s| s.analysis().history()).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, VeriqoError};
use crate::models::{Analysis, User};
use crate::payment::PaymentOutcome;
use crate::transport::Transport;
use crate::VeriqoSdk;

// ---------------------------------------------------------------------------
// AsyncVeriqoSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncVeriqoSdk`] instance.
#[derive(Default)]
pub struct AsyncVeriqoSdkBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    store_dir: Option<PathBuf>,
    transport: Option<Arc<dyn Transport>>,
    token: Option<String>,
    persist_session: bool,
}

impl AsyncVeriqoSdkBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn persist_session(mut self, persist: bool) -> Self {
        self.persist_session = persist;
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization may read the session file, so it runs on the blocking
    /// thread pool.
    pub async fn build(self) -> Result<AsyncVeriqoSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = VeriqoSdk::builder().persist_session(self.persist_session);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(dir) = self.store_dir {
                builder = builder.store_dir(dir);
            }
            if let Some(transport) = self.transport {
                builder = builder.transport(transport);
            }
            if let Some(token) = self.token {
                builder = builder.token(token);
            }
            let sdk = builder.build()?;
            Ok(AsyncVeriqoSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| VeriqoError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncVeriqoSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`VeriqoSdk`].
///
/// The SDK is shared behind an [`Arc`]; its session and transport are
/// already thread-safe, so concurrent calls do not serialize on a lock.
#[derive(Clone)]
pub struct AsyncVeriqoSdk {
    inner: Arc<VeriqoSdk>,
}

impl AsyncVeriqoSdk {
    pub fn builder() -> AsyncVeriqoSdkBuilder {
        AsyncVeriqoSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&VeriqoSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| VeriqoError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Analyze a product as the signed-in user.
    pub async fn analyze(&self, amazon_url: &str) -> Result<Analysis> {
        let url = amazon_url.to_string();
        self.run(move |s| s.analysis().analyze(&url)).await
    }

    /// Refresh and return the current user.
    pub async fn me(&self) -> Result<User> {
        self.run(|s| s.auth().me()).await
    }

    /// Poll a checkout session to completion with the default budget.
    pub async fn confirm_payment(&self, session_id: &str) -> Result<PaymentOutcome> {
        let id = session_id.to_string();
        self.run(move |s| Ok(s.payment_poller().poll(&id))).await
    }

    /// Borrow the wrapped blocking SDK.
    pub fn blocking(&self) -> &VeriqoSdk {
        &self.inner
    }
}
