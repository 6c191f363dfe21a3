//! Veriqo SDK for Rust.
//!
//! Client for the Veriqo purchase-verdict backend: paste an Amazon product
//! URL, get back a Great Match / Good Match / Consider Options verdict. Also
//! covers accounts, checkout, wishlists, price alerts, the admin dashboard,
//! and the browser extension's background worker with its local cache and
//! anonymous free-check quota.
//!
//! # Quick start
//!
//! ```no_run
//! use veriqo_sdk::VeriqoSdk;
//!
//! let sdk = VeriqoSdk::builder().build().unwrap();
//!
//! sdk.auth().login("shopper@example.com", "hunter2").unwrap();
//! let analysis = sdk.analysis().analyze("https://www.amazon.com/dp/B08N5WRWNW").unwrap();
//! println!("{} ({}%)", analysis.verdict(), analysis.confidence());
//! ```

pub mod api;
#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod error;
pub mod extension;
pub mod models;
pub mod payment;
pub mod session;
pub mod transport;
pub mod verdict;

#[cfg(feature = "async")]
pub use async_client::AsyncVeriqoSdk;
pub use client::{ApiClient, Auth};
pub use error::{Result, VeriqoError};
pub use extension::{ExtensionStore, ExtensionWorker};
pub use payment::{PaymentOutcome, PaymentPoller, PaymentState};
pub use session::Session;
pub use transport::{HttpTransport, Transport};
pub use verdict::Verdict;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use models::User;

// ---------------------------------------------------------------------------
// VeriqoSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`VeriqoSdk`] instance.
///
/// Use [`VeriqoSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](VeriqoSdkBuilder::build) to create the SDK.
pub struct VeriqoSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    store_dir: Option<PathBuf>,
    transport: Option<Arc<dyn Transport>>,
    token: Option<String>,
    persist_session: bool,
}

impl Default for VeriqoSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            store_dir: None,
            transport: None,
            token: None,
            persist_session: false,
        }
    }
}

impl VeriqoSdkBuilder {
    /// Set the backend base URL (without the `/api` suffix).
    ///
    /// If not set, `VERIQO_BACKEND_URL` is consulted, then the production
    /// default.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 60 seconds.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory for the session token file and the extension store.
    ///
    /// If not set, the platform cache directory is used (e.g.
    /// `~/.cache/veriqo-sdk` on Linux).
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the HTTP transport, e.g. with a recording double in tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Start with an existing bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Persist the session token in the store directory across runs.
    pub fn persist_session(mut self, persist: bool) -> Self {
        self.persist_session = persist;
        self
    }

    /// Build the SDK.
    ///
    /// Nothing is sent to the backend here; with `persist_session` enabled a
    /// previously saved token is loaded from disk.
    pub fn build(self) -> Result<VeriqoSdk> {
        let base_url = self.base_url.unwrap_or_else(config::backend_url);
        let store_dir = self.store_dir.unwrap_or_else(config::default_store_dir);
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new(self.timeout)));

        let session = if self.persist_session {
            let session = Session::persistent(store_dir.join(config::SESSION_FILE))?;
            if let Some(token) = self.token {
                session.set_token(token);
            }
            session
        } else {
            match self.token {
                Some(token) => Session::with_token(token),
                None => Session::new(),
            }
        };

        Ok(VeriqoSdk {
            client: ApiClient::new(base_url, transport, session),
            store_dir,
        })
    }
}

// ---------------------------------------------------------------------------
// VeriqoSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Veriqo SDK.
///
/// Wraps an [`ApiClient`] (which owns the transport and the [`Session`]) and
/// exposes each REST surface as a lightweight borrowing wrapper.
///
/// Created via [`VeriqoSdk::builder()`].
pub struct VeriqoSdk {
    client: ApiClient,
    store_dir: PathBuf,
}

impl VeriqoSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> VeriqoSdkBuilder {
        VeriqoSdkBuilder::default()
    }

    // -- Endpoint accessors ------------------------------------------------

    /// Login, registration, OAuth/OTP exchange and the current account.
    pub fn auth(&self) -> api::AuthApi<'_> {
        api::AuthApi::new(&self.client)
    }

    /// Product analysis, comparison, history and public insights.
    pub fn analysis(&self) -> api::AnalysisApi<'_> {
        api::AnalysisApi::new(&self.client)
    }

    pub fn payments(&self) -> api::PaymentsApi<'_> {
        api::PaymentsApi::new(&self.client)
    }

    pub fn wishlist(&self) -> api::WishlistApi<'_> {
        api::WishlistApi::new(&self.client)
    }

    pub fn price_alerts(&self) -> api::PriceAlertApi<'_> {
        api::PriceAlertApi::new(&self.client)
    }

    /// Admin dashboard. Non-admin sessions get [`VeriqoError::Forbidden`].
    pub fn admin(&self) -> api::AdminApi<'_> {
        api::AdminApi::new(&self.client)
    }

    /// A checkout confirmation poller with the default attempt budget.
    pub fn payment_poller(&self) -> PaymentPoller<'_> {
        PaymentPoller::new(&self.client)
    }

    /// An extension worker whose store lives in the SDK's store directory.
    ///
    /// The worker shares this SDK's transport and base URL but keeps its own
    /// token in the store rather than in the SDK session.
    pub fn extension_worker(&self) -> Result<ExtensionWorker> {
        let store = ExtensionStore::open(Some(self.store_dir.clone()))?;
        Ok(ExtensionWorker::new(
            self.client.base_url(),
            self.client.transport().clone(),
            store,
        ))
    }

    // -- Session -----------------------------------------------------------

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// The cached account record, if a login or `/auth/me` has populated it.
    pub fn current_user(&self) -> Option<User> {
        self.client.session().user()
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for VeriqoSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VeriqoSdk(base_url={}, store_dir={}, authenticated={})",
            self.client.base_url(),
            self.store_dir.display(),
            self.is_authenticated()
        )
    }
}
