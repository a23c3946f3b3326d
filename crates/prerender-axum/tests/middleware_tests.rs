//! End-to-end middleware tests over an in-memory axum app, mirroring
//! the routes of a small host application.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::response::Html;
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

use prerender_axum::{PrerenderState, prerender_middleware};
use prerender_core::error::PrerenderError;
use prerender_core::testutil::{MockRenderFetcher, RecordingHooks};
use prerender_core::{ClassifierConfig, RenderService, RenderedResponse};

const RAW: &str = "<html><body>RAW</body></html>";
const PRERENDERED: &str = "<html><body>PRERENDERED</body></html>";

async fn raw() -> Html<&'static str> {
    Html(RAW)
}

fn test_app(
    classifier: ClassifierConfig,
    fetcher: MockRenderFetcher,
    hooks: RecordingHooks,
) -> Router {
    let state = Arc::new(PrerenderState {
        classifier,
        service: RenderService::with_hooks(fetcher, hooks),
    });

    Router::new()
        .route("/", get(raw).post(raw))
        .route("/file.js", get(raw))
        .route("/whitelisted-url1", get(raw))
        .route("/blacklisted-url1", get(raw))
        .route("/whitelisted-url-blacklisted-url", get(raw))
        .layer(middleware::from_fn_with_state(
            state,
            prerender_middleware::<MockRenderFetcher, RecordingHooks>,
        ))
}

fn default_app(fetcher: MockRenderFetcher) -> Router {
    test_app(
        ClassifierConfig::new(),
        fetcher,
        RecordingHooks::empty(),
    )
}

async fn send(
    app: Router,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, String) {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("host", "testserver");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn request_without_user_agent_falls_through() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (status, body) = send(app, "GET", "/", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn regular_browser_falls_through() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (_, body) = send(app, "GET", "/", &[("user-agent", "Chrome")]).await;
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn crawler_request_is_prerendered() {
    let fetcher = MockRenderFetcher::new(PRERENDERED);
    let app = default_app(fetcher.clone());

    let (status, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PRERENDERED);
    assert_eq!(fetcher.calls(), vec!["http://testserver/"]);
}

#[tokio::test]
async fn crawler_match_is_case_insensitive() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (_, body) = send(app, "GET", "/", &[("user-agent", "LinkedInBot/1.0")]).await;
    assert_eq!(body, PRERENDERED);
}

#[tokio::test]
async fn bufferbot_header_forces_prerender() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (_, body) = send(
        app,
        "GET",
        "/",
        &[("user-agent", "Chrome"), ("x-bufferbot", "Buffer")],
    )
    .await;
    assert_eq!(body, PRERENDERED);
}

#[tokio::test]
async fn prerender_header_falls_through() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (_, body) = send(
        app,
        "GET",
        "/",
        &[("user-agent", "googlebot"), ("x-prerender", "Prerender")],
    )
    .await;
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn post_request_falls_through() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (_, body) = send(app, "POST", "/", &[("user-agent", "googlebot")]).await;
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn static_asset_falls_through() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));
    let (_, body) = send(app, "GET", "/file.js", &[("user-agent", "googlebot")]).await;
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn allowlisted_path_is_prerendered() {
    let classifier = ClassifierConfig::new()
        .with_allowlist(&["^/whitelisted-url"])
        .unwrap();
    let app = test_app(
        classifier,
        MockRenderFetcher::new(PRERENDERED),
        RecordingHooks::empty(),
    );

    let (_, body) = send(
        app,
        "GET",
        "/whitelisted-url1",
        &[("user-agent", "googlebot")],
    )
    .await;
    assert_eq!(body, PRERENDERED);
}

#[tokio::test]
async fn path_outside_allowlist_falls_through() {
    let classifier = ClassifierConfig::new()
        .with_allowlist(&["^/whitelisted-url"])
        .unwrap();
    let app = test_app(
        classifier,
        MockRenderFetcher::new(PRERENDERED),
        RecordingHooks::empty(),
    );

    let (_, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn denylisted_path_falls_through() {
    let classifier = ClassifierConfig::new()
        .with_denylist(&["^/blacklisted-url"])
        .unwrap();
    let app = test_app(
        classifier.clone(),
        MockRenderFetcher::new(PRERENDERED),
        RecordingHooks::empty(),
    );

    let (_, body) = send(
        app,
        "GET",
        "/blacklisted-url1",
        &[("user-agent", "googlebot")],
    )
    .await;
    assert_eq!(body, RAW);

    let app = test_app(
        classifier,
        MockRenderFetcher::new(PRERENDERED),
        RecordingHooks::empty(),
    );
    let (_, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;
    assert_eq!(body, PRERENDERED);
}

#[tokio::test]
async fn denylist_wins_over_allowlist() {
    let classifier = ClassifierConfig::new()
        .with_allowlist(&["^/whitelisted-url"])
        .unwrap()
        .with_denylist(&[".*blacklisted-url$"])
        .unwrap();
    let app = test_app(
        classifier,
        MockRenderFetcher::new(PRERENDERED),
        RecordingHooks::empty(),
    );

    let (_, body) = send(
        app,
        "GET",
        "/whitelisted-url-blacklisted-url",
        &[("user-agent", "googlebot")],
    )
    .await;
    assert_eq!(body, RAW);
}

#[tokio::test]
async fn prerendered_response_has_html_content_type() {
    let app = default_app(MockRenderFetcher::new(PRERENDERED));

    let response = app
        .oneshot(
            Request::get("/")
                .header("host", "testserver")
                .header("user-agent", "googlebot")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn query_string_is_forwarded_in_the_original_url() {
    let fetcher = MockRenderFetcher::new(PRERENDERED);
    let app = default_app(fetcher.clone());

    send(app, "GET", "/?q=1", &[("user-agent", "googlebot")]).await;

    assert_eq!(fetcher.calls(), vec!["http://testserver/?q=1"]);
}

#[tokio::test]
async fn forwarded_proto_sets_the_url_scheme() {
    let fetcher = MockRenderFetcher::new(PRERENDERED);
    let app = default_app(fetcher.clone());

    send(
        app,
        "GET",
        "/",
        &[("user-agent", "googlebot"), ("x-forwarded-proto", "https")],
    )
    .await;

    assert_eq!(fetcher.calls(), vec!["https://testserver/"]);
}

#[tokio::test]
async fn before_render_hook_bypasses_the_fetch() {
    let fetcher = MockRenderFetcher::new(PRERENDERED);
    let hooks = RecordingHooks::with_response(RenderedResponse::cached(
        "<html><body>CACHED</body></html>".to_string(),
    ));
    let app = test_app(ClassifierConfig::new(), fetcher.clone(), hooks.clone());

    let (status, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html><body>CACHED</body></html>");
    assert!(fetcher.calls().is_empty());
    assert_eq!(hooks.after_calls(), vec![("http://testserver/".to_string(), true)]);
}

#[tokio::test]
async fn after_render_hook_sees_fresh_responses() {
    let hooks = RecordingHooks::empty();
    let app = test_app(
        ClassifierConfig::new(),
        MockRenderFetcher::new(PRERENDERED),
        hooks.clone(),
    );

    send(app, "GET", "/", &[("user-agent", "googlebot")]).await;

    assert_eq!(
        hooks.after_calls(),
        vec![("http://testserver/".to_string(), false)]
    );
}

#[tokio::test]
async fn upstream_timeout_returns_gateway_timeout() {
    let app = default_app(MockRenderFetcher::with_error(PrerenderError::Timeout(30)));

    let (status, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "upstream_timeout");
}

#[tokio::test]
async fn upstream_network_failure_returns_bad_gateway() {
    let app = default_app(MockRenderFetcher::with_error(PrerenderError::NetworkError(
        "connection refused".into(),
    )));

    let (status, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "upstream_error");
}

#[tokio::test]
async fn hook_failure_returns_internal_error() {
    let hooks = RecordingHooks::with_before_error(PrerenderError::HookError("cache down".into()));
    let app = test_app(
        ClassifierConfig::new(),
        MockRenderFetcher::new(PRERENDERED),
        hooks,
    );

    let (status, body) = send(app, "GET", "/", &[("user-agent", "googlebot")]).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "hook_error");
}
