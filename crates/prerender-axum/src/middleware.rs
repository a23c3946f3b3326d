use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use prerender_core::traits::{RenderFetcher, RenderHooks};
use prerender_core::{ClassifierConfig, RenderService, RenderedResponse, RequestView};

use crate::error::RenderError;

/// Shared middleware state, read-only after startup. Wrap in an `Arc`
/// and pass to `axum::middleware::from_fn_with_state`.
pub struct PrerenderState<F, H>
where
    F: RenderFetcher,
    H: RenderHooks,
{
    pub classifier: ClassifierConfig,
    pub service: RenderService<F, H>,
}

/// Middleware that intercepts crawler requests and answers them with a
/// prerendered HTML snapshot; everything else falls through to normal
/// routing.
///
/// ```ignore
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         prerender_middleware::<ReqwestRenderFetcher, NoopHooks>,
///     ));
/// ```
pub async fn prerender_middleware<F, H>(
    State(state): State<Arc<PrerenderState<F, H>>>,
    request: Request<Body>,
    next: Next,
) -> Response
where
    F: RenderFetcher + 'static,
    H: RenderHooks + 'static,
{
    // A request we cannot project (non-UTF-8 headers, unparseable URL)
    // is never an error; it just isn't delegated.
    let view = match request_view(&request) {
        Some(view) => view,
        None => return next.run(request).await,
    };

    if !state.classifier.should_prerender(&view) {
        return next.run(request).await;
    }

    match state.service.render(&view).await {
        Ok(rendered) => html_response(rendered),
        Err(err) => {
            tracing::error!(url = %view.url(), error = %err, "prerender delegation failed");
            RenderError(err).into_response()
        }
    }
}

/// Project the inbound request into the core's view, reconstructing
/// the full original URL from `x-forwarded-proto`, the `Host` header,
/// and the request path+query.
fn request_view(request: &Request<Body>) -> Option<RequestView> {
    let headers = request.headers();

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let url = format!("{scheme}://{host}{path_and_query}");
    let mut view = RequestView::new(request.method().as_str(), &url).ok()?;

    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            view = view.with_header(name.as_str(), value);
        }
    }

    Some(view)
}

fn html_response(rendered: RenderedResponse) -> Response {
    (
        [(header::CONTENT_TYPE, RenderedResponse::CONTENT_TYPE)],
        rendered.into_html(),
    )
        .into_response()
}
