use crate::error::PrerenderError;
use crate::models::RenderedResponse;
use crate::request::RequestView;
use crate::traits::{RenderFetcher, RenderHooks};

/// Orchestrates delegation for an eligible request:
/// before-hook → upstream fetch (skipped if the hook answered) → after-hook.
///
/// Generic over the fetcher and hooks via traits, enabling dependency
/// injection and testability without real HTTP calls. Hook errors
/// propagate to the caller as request failures; they are never
/// swallowed into a fall-through.
pub struct RenderService<F, H>
where
    F: RenderFetcher,
    H: RenderHooks,
{
    fetcher: F,
    hooks: Option<H>,
}

impl<F, H> RenderService<F, H>
where
    F: RenderFetcher,
    H: RenderHooks,
{
    /// Create a RenderService without hooks.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            hooks: None,
        }
    }

    /// Create a RenderService with user-supplied hooks.
    pub fn with_hooks(fetcher: F, hooks: H) -> Self {
        Self {
            fetcher,
            hooks: Some(hooks),
        }
    }

    /// Produce the rendered response for an eligible request.
    ///
    /// 1. Ask `before_render` for a cached response
    /// 2. If none, fetch the snapshot from the rendering service
    /// 3. Notify `after_render` with the chosen response and flag
    pub async fn render(&self, request: &RequestView) -> Result<RenderedResponse, PrerenderError> {
        let hook_response = match &self.hooks {
            Some(hooks) => hooks.before_render(request).await?,
            None => None,
        };

        let (response, cached) = match hook_response {
            Some(response) => {
                tracing::debug!(url = %request.url(), "serving snapshot from before_render hook");
                (response.into_cached(), true)
            }
            None => {
                tracing::info!(url = %request.url(), "fetching snapshot from rendering service");
                let html = self.fetcher.fetch(request.url()).await?;
                tracing::debug!(url = %request.url(), bytes = html.len(), "snapshot fetched");
                (RenderedResponse::fresh(html), false)
            }
        };

        if let Some(hooks) = &self.hooks {
            hooks.after_render(request, &response, cached).await?;
        }

        Ok(response)
    }
}
