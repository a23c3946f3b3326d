use std::future::Future;

use crate::error::PrerenderError;
use crate::models::RenderedResponse;
use crate::request::RequestView;

/// Fetches a rendered HTML snapshot for the full original URL.
///
/// Implementations own the upstream connection details (base URL,
/// credentials, timeout); the caller passes only the original URL.
pub trait RenderFetcher: Send + Sync + Clone {
    fn fetch(
        &self,
        original_url: &str,
    ) -> impl Future<Output = Result<String, PrerenderError>> + Send;
}

/// Optional user-supplied hooks around the upstream fetch.
///
/// `before_render` may supply a response (e.g. from a cache), in which
/// case the upstream fetch is skipped entirely. `after_render` is
/// notified exactly once per delegated request with the chosen
/// response and whether it came from the hook (`cached = true`) or the
/// fetch (`cached = false`). Both may perform their own I/O; the
/// service awaits each before moving on.
pub trait RenderHooks: Send + Sync {
    fn before_render(
        &self,
        request: &RequestView,
    ) -> impl Future<Output = Result<Option<RenderedResponse>, PrerenderError>> + Send;

    fn after_render(
        &self,
        request: &RequestView,
        response: &RenderedResponse,
        cached: bool,
    ) -> impl Future<Output = Result<(), PrerenderError>> + Send;
}

/// No-op hooks, the default when no hooks are configured.
#[derive(Debug, Clone)]
pub struct NoopHooks;

impl RenderHooks for NoopHooks {
    async fn before_render(
        &self,
        _request: &RequestView,
    ) -> Result<Option<RenderedResponse>, PrerenderError> {
        Ok(None)
    }

    async fn after_render(
        &self,
        _request: &RequestView,
        _response: &RenderedResponse,
        _cached: bool,
    ) -> Result<(), PrerenderError> {
        Ok(())
    }
}
