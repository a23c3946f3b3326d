use std::collections::HashMap;

use url::Url;

use crate::error::PrerenderError;

/// Read-only projection of an inbound HTTP request.
///
/// Built once per request by the host integration layer and discarded
/// after the middleware returns. Header lookup is case-insensitive:
/// keys are lowercased on insert.
#[derive(Debug, Clone)]
pub struct RequestView {
    method: String,
    path: String,
    url: String,
    headers: HashMap<String, String>,
}

impl RequestView {
    /// Create a view from a method and the full original URL
    /// (scheme + host + path + query). The path is derived from the
    /// URL with the query string stripped.
    pub fn new(method: &str, url: &str) -> Result<Self, PrerenderError> {
        let parsed = Url::parse(url)
            .map_err(|e| PrerenderError::InvalidRequest(format!("Invalid URL '{url}': {e}")))?;

        Ok(Self {
            method: method.to_string(),
            path: parsed.path().to_string(),
            url: url.to_string(),
            headers: HashMap::new(),
        })
    }

    /// Attach a header. Later values overwrite earlier ones for the
    /// same (case-insensitive) name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full original URL, passed verbatim to the rendering service.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_strips_query_string() {
        let view = RequestView::new("GET", "http://testserver/search?q=rust").unwrap();
        assert_eq!(view.path(), "/search");
        assert_eq!(view.url(), "http://testserver/search?q=rust");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let view = RequestView::new("GET", "http://testserver/")
            .unwrap()
            .with_header("User-Agent", "googlebot");

        assert_eq!(view.header("user-agent"), Some("googlebot"));
        assert_eq!(view.header("USER-AGENT"), Some("googlebot"));
        assert_eq!(view.header("x-prerender"), None);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = RequestView::new("GET", "not a url").unwrap_err();
        assert!(matches!(err, PrerenderError::InvalidRequest(_)));
    }
}
