//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit and integration
//! tests. All mocks use `Arc<Mutex<_>>` for interior mutability,
//! allowing assertions on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::PrerenderError;
use crate::models::RenderedResponse;
use crate::request::RequestView;
use crate::traits::{RenderFetcher, RenderHooks};

// ---------------------------------------------------------------------------
// MockRenderFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable snapshot and records every
/// URL it was asked to fetch.
#[derive(Clone)]
pub struct MockRenderFetcher {
    responses: Arc<Mutex<Vec<Result<String, PrerenderError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockRenderFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(html.to_string())])),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: PrerenderError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs passed to `fetch`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RenderFetcher for MockRenderFetcher {
    async fn fetch(&self, original_url: &str) -> Result<String, PrerenderError> {
        self.calls.lock().unwrap().push(original_url.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingHooks
// ---------------------------------------------------------------------------

/// Hooks that return a configurable `before_render` answer and record
/// every `after_render` notification as `(url, cached)`.
#[derive(Clone)]
pub struct RecordingHooks {
    before_response: Arc<Mutex<Option<RenderedResponse>>>,
    before_error: Arc<Mutex<Option<PrerenderError>>>,
    after_error: Arc<Mutex<Option<PrerenderError>>>,
    after_calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl RecordingHooks {
    /// Hooks whose `before_render` yields nothing.
    pub fn empty() -> Self {
        Self {
            before_response: Arc::new(Mutex::new(None)),
            before_error: Arc::new(Mutex::new(None)),
            after_error: Arc::new(Mutex::new(None)),
            after_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hooks whose `before_render` supplies a response (cache hit).
    pub fn with_response(response: RenderedResponse) -> Self {
        let hooks = Self::empty();
        *hooks.before_response.lock().unwrap() = Some(response);
        hooks
    }

    /// Hooks whose `before_render` fails.
    pub fn with_before_error(error: PrerenderError) -> Self {
        let hooks = Self::empty();
        *hooks.before_error.lock().unwrap() = Some(error);
        hooks
    }

    /// Hooks whose `after_render` fails.
    pub fn with_after_error(error: PrerenderError) -> Self {
        let hooks = Self::empty();
        *hooks.after_error.lock().unwrap() = Some(error);
        hooks
    }

    /// Recorded `after_render` notifications, in call order.
    pub fn after_calls(&self) -> Vec<(String, bool)> {
        self.after_calls.lock().unwrap().clone()
    }
}

impl RenderHooks for RecordingHooks {
    async fn before_render(
        &self,
        _request: &RequestView,
    ) -> Result<Option<RenderedResponse>, PrerenderError> {
        if let Some(error) = self.before_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.before_response.lock().unwrap().clone())
    }

    async fn after_render(
        &self,
        request: &RequestView,
        _response: &RenderedResponse,
        cached: bool,
    ) -> Result<(), PrerenderError> {
        if let Some(error) = self.after_error.lock().unwrap().take() {
            return Err(error);
        }
        self.after_calls
            .lock()
            .unwrap()
            .push((request.url().to_string(), cached));
        Ok(())
    }
}
