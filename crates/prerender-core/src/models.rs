/// A rendered HTML snapshot, produced either by the `before_render`
/// hook (cached) or by the upstream fetch (fresh).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    html: String,
    cached: bool,
}

impl RenderedResponse {
    /// Content type of every delegated response, regardless of what
    /// the rendering service reported.
    pub const CONTENT_TYPE: &'static str = "text/html; charset=utf-8";

    /// Snapshot fetched from the rendering service.
    pub fn fresh(html: String) -> Self {
        Self {
            html,
            cached: false,
        }
    }

    /// Snapshot supplied by the pre-check hook.
    pub fn cached(html: String) -> Self {
        Self { html, cached: true }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Re-mark the response as cached. Applied to whatever the
    /// pre-check hook returns, whichever constructor it used.
    pub(crate) fn into_cached(mut self) -> Self {
        self.cached = true;
        self
    }
}
