//! Shared test fixtures for the Veriqo SDK integration tests.
//!
//! Provides a scripted, recording [`MockTransport`] that stands in for the
//! backend, sample JSON payloads, and helpers that wire an SDK or extension
//! worker to the mock with a temporary store directory.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::{json, Value};
use veriqo_sdk::error::{Result, VeriqoError};
use veriqo_sdk::transport::{ApiRequest, ApiResponse, Method, Transport};
use veriqo_sdk::{ExtensionStore, ExtensionWorker, VeriqoSdk};

pub const BASE_URL: &str = "http://backend.test";

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, Value),
    Raw(u16, Vec<u8>),
    /// The request never reaches the server.
    NetworkError,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Reply::Json(200, body)
    }

    pub fn detail(status: u16, detail: &str) -> Self {
        Reply::Json(status, json!({ "detail": detail }))
    }
}

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<Reply>,
}

/// A recorded request and when it was made.
#[derive(Debug, Clone)]
pub struct Call {
    pub request: ApiRequest,
    pub at: Instant,
}

/// Backend double. Routes are matched on method and `/api`-relative path.
/// Each route replays its queued replies in order and then keeps repeating
/// the last one. Unmatched requests get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for `method path`.
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        let mut routes = self.routes.lock().unwrap();
        if let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.replies.push_back(reply);
        } else {
            routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            });
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests made to `path` with any method.
    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        let url = format!("{}/api{}", BASE_URL, path);
        self.calls()
            .into_iter()
            .filter(|c| c.request.url == url)
            .collect()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.calls.lock().unwrap().last().map(|c| c.request.clone())
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(Call {
            request: request.clone(),
            at: Instant::now(),
        });

        let prefix = format!("{}/api", BASE_URL);
        let path = request.url.strip_prefix(&prefix).unwrap_or(&request.url);

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            routes
                .iter_mut()
                .find(|r| r.method == request.method && r.path == path)
                .map(|r| {
                    if r.replies.len() > 1 {
                        r.replies.pop_front().unwrap()
                    } else {
                        r.replies.front().cloned().unwrap()
                    }
                })
        };

        match reply {
            Some(Reply::Json(status, body)) => Ok(ApiResponse {
                status,
                body: serde_json::to_vec(&body).unwrap(),
            }),
            Some(Reply::Raw(status, body)) => Ok(ApiResponse { status, body }),
            Some(Reply::NetworkError) => {
                Err(VeriqoError::Transport("connection refused".to_string()))
            }
            None => Ok(ApiResponse {
                status: 404,
                body: br#"{"detail":"Not Found"}"#.to_vec(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// An SDK talking to `mock`, with its store in a fresh temp directory.
///
/// Returns `(VeriqoSdk, TempDir)`; keep the `TempDir` alive for the test.
pub fn sdk(mock: &Arc<MockTransport>) -> (VeriqoSdk, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = VeriqoSdk::builder()
        .base_url(BASE_URL)
        .transport(mock.clone())
        .store_dir(tmp.path())
        .build()
        .unwrap();
    (sdk, tmp)
}

/// Like [`sdk`], already holding `token`.
pub fn signed_in_sdk(mock: &Arc<MockTransport>, token: &str) -> (VeriqoSdk, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = VeriqoSdk::builder()
        .base_url(BASE_URL)
        .transport(mock.clone())
        .store_dir(tmp.path())
        .token(token)
        .build()
        .unwrap();
    (sdk, tmp)
}

/// An extension worker backed by an in-memory store.
pub fn worker(mock: &Arc<MockTransport>) -> ExtensionWorker {
    ExtensionWorker::new(BASE_URL, mock.clone(), ExtensionStore::in_memory())
}

// ---------------------------------------------------------------------------
// Sample payloads
// ---------------------------------------------------------------------------

pub fn user_json(subscription: &str) -> Value {
    json!({
        "id": "user-001",
        "name": "Dana Shopper",
        "email": "dana@example.com",
        "subscription_type": subscription,
        "checks_remaining": 7,
        "is_admin": false,
        "onboarding_completed": false,
        "created_at": "2025-01-04T10:00:00Z"
    })
}

pub fn auth_json(token: &str, subscription: &str) -> Value {
    json!({ "token": token, "user": user_json(subscription) })
}

pub fn analysis_json(asin: &str, verdict: &str) -> Value {
    json!({
        "id": format!("analysis-{}", asin.to_lowercase()),
        "product_name": "Noise Cancelling Headphones",
        "product_image": "https://images.example.com/headphones.jpg",
        "amazon_url": format!("https://www.amazon.com/dp/{}", asin),
        "affiliate_url": format!("https://www.amazon.com/dp/{}?tag=veriqo-20", asin),
        "verdict": verdict,
        "confidence_score": 82,
        "summary": "Comfortable and quiet, with a weak microphone.",
        "things_to_know": [
            {
                "title": "Microphone quality",
                "description": "Callers report muffled audio outdoors.",
                "frequency": "common"
            }
        ],
        "best_suited_for": ["Commuters", "Open-plan offices"],
        "positive_highlights": ["Battery life", "Comfort"],
        "analyzed_at": "2025-02-11T09:30:00Z"
    })
}

pub fn wishlist_json() -> Value {
    json!([
        {
            "id": "wish-001",
            "product_url": "https://www.amazon.com/dp/B08N5WRWNW",
            "product_name": "Apple AirTag",
            "product_image": "https://images.example.com/airtag.jpg",
            "notes": "Gift for Sam",
            "added_at": "2025-02-01T12:00:00Z"
        },
        {
            "id": "wish-002",
            "product_url": "https://www.amazon.com/dp/B09V3KXJPB",
            "product_name": "Echo Dot (5th Gen)",
            "product_image": null,
            "notes": null,
            "added_at": "2025-02-02T08:15:00Z"
        }
    ])
}

pub fn price_alerts_json() -> Value {
    json!([
        {
            "id": "alert-001",
            "product_url": "https://www.amazon.com/dp/B08N5WRWNW",
            "product_name": "Apple AirTag",
            "product_image": "https://images.example.com/airtag.jpg",
            "target_price": 24.99,
            "original_price": 29.0,
            "current_price": 23.5,
            "price_dropped": true,
            "is_active": true,
            "last_checked": "2025-02-10T06:00:00Z",
            "created_at": "2025-01-20T06:00:00Z"
        },
        {
            "id": "alert-002",
            "product_url": "https://www.amazon.com/dp/B09V3KXJPB",
            "product_name": "Echo Dot (5th Gen)",
            "product_image": null,
            "target_price": null,
            "original_price": 49.99,
            "current_price": 49.99,
            "price_dropped": false,
            "is_active": false,
            "last_checked": null,
            "created_at": "2025-01-22T06:00:00Z"
        }
    ])
}
