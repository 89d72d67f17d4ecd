//! Server test utilities.

use async_trait::async_trait;
use reelay_core::config::AppConfig;
use reelay_server::{AppState, create_router};
use reelay_upstream::{FetchError, FetchResult, VideoSource};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted upstream source with a call counter.
///
/// Responses are consumed in push order; once the script is exhausted,
/// further calls return an empty listing so tests fail on call counts
/// rather than panics.
pub struct MockSource {
    calls: AtomicUsize,
    script: Mutex<VecDeque<FetchResult<Value>>>,
}

/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
impl MockSource {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a successful raw payload.
    pub fn push_ok(&self, payload: Value) {
        self.script.lock().unwrap().push_back(Ok(payload));
    }

    /// Queue a fetch error.
    pub fn push_err(&self, error: FetchError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for MockSource {
    async fn fetch_user_videos(
        &self,
        _user_id: &str,
        _max_cursor: i64,
        _count: u32,
    ) -> FetchResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "aweme_list": [] })))
    }
}

/// A test server wrapper with a scripted upstream.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub source: Arc<MockSource>,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server with the testing config (credential present,
    /// small fast cache).
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test server with config modifications applied on top of
    /// the testing defaults.
    pub fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        let source = Arc::new(MockSource::new());
        let state = AppState::new(config, source.clone());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            source,
        }
    }
}
