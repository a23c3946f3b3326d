use crate::config::ClassifierConfig;
use crate::request::RequestView;

impl ClassifierConfig {
    /// Decide whether a request should be delegated to the rendering
    /// service. Pure function over the request metadata; performs no I/O.
    ///
    /// A request is eligible when all of the following hold:
    /// 1. the method is exactly `GET`;
    /// 2. a non-empty `user-agent` header is present;
    /// 3. no `x-prerender` header is present (loop prevention: the
    ///    rendering service marks its own requests with it);
    /// 4. either an `x-bufferbot` header is present, or the user-agent
    ///    contains one of the configured crawler substrings
    ///    (case-insensitive);
    /// 5. the path does not end with an ignored extension;
    /// 6. if an allow-list is configured, the path matches one of its
    ///    patterns;
    /// 7. the path matches no deny-list pattern.
    pub fn should_prerender(&self, request: &RequestView) -> bool {
        if request.method() != "GET" {
            return false;
        }

        let user_agent = match request.header("user-agent") {
            Some(ua) if !ua.is_empty() => ua,
            _ => return false,
        };

        if request.header("x-prerender").is_some() {
            return false;
        }

        let buffer_agent = request.header("x-bufferbot").is_some();
        if !buffer_agent && !self.is_crawler(user_agent) {
            return false;
        }

        let path = request.path();

        if self
            .extensions_to_ignore
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            return false;
        }

        if let Some(allowlist) = &self.allowlist
            && !allowlist.iter().any(|pattern| pattern.is_match(path))
        {
            return false;
        }

        if let Some(denylist) = &self.denylist
            && denylist.iter().any(|pattern| pattern.is_match(path))
        {
            return false;
        }

        true
    }

    fn is_crawler(&self, user_agent: &str) -> bool {
        let user_agent = user_agent.to_lowercase();
        self.crawler_user_agents
            .iter()
            .any(|crawler| user_agent.contains(crawler.as_str()))
    }
}
