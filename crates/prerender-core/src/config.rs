use regex::Regex;

use crate::error::PrerenderError;

/// User-agent substrings identifying search-engine and social crawlers.
/// Matched case-insensitively against the inbound `user-agent` header.
pub const DEFAULT_CRAWLER_USER_AGENTS: &[&str] = &[
    "googlebot",
    "yahoo",
    "bingbot",
    "baiduspider",
    "facebookexternalhit",
    "twitterbot",
    "rogerbot",
    "linkedinbot",
    "embedly",
    "bufferbot",
    "quora link preview",
    "showyoubot",
    "outbrain",
    "pinterest/0.",
    "developers.google.com/+/web/snippet",
    "www.google.com/webmasters/tools/richsnippets",
    "slackbot",
    "vkshare",
    "w3c_validator",
    "redditbot",
    "applebot",
    "whatsapp",
    "flipboard",
    "tumblr",
    "bitlybot",
    "skypeuripreview",
    "nuzzel",
    "discordbot",
    "google page speed",
    "qwantify",
    "chrome-lighthouse",
];

/// File extensions that never get delegated to the rendering service.
pub const DEFAULT_EXTENSIONS_TO_IGNORE: &[&str] = &[
    ".js", ".css", ".xml", ".less", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".pdf", ".doc",
    ".txt", ".ico", ".rss", ".zip", ".mp3", ".rar", ".exe", ".wmv", ".avi", ".ppt", ".mpg",
    ".mpeg", ".tif", ".wav", ".mov", ".psd", ".ai", ".xls", ".mp4", ".m4a", ".swf", ".dat",
    ".dmg", ".iso", ".flv", ".m4v", ".torrent",
];

/// Default rendering service endpoint.
pub const DEFAULT_SERVICE_URL: &str = "http://service.prerender.io/";

/// Compile path patterns with match-at-start semantics.
///
/// The source engine anchored matches at position 0 without requiring
/// the pattern to cover the whole path, so each pattern is wrapped in
/// `^(?:...)`. Invalid syntax fails here, at configuration time.
fn compile_patterns(patterns: &[impl AsRef<str>]) -> Result<Vec<Regex>, PrerenderError> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            Regex::new(&format!("^(?:{p})"))
                .map_err(|e| PrerenderError::ConfigError(format!("Invalid pattern '{p}': {e}")))
        })
        .collect()
}

/// Immutable classification rules, built once at startup.
///
/// Safe for unsynchronized concurrent reads; nothing here is mutated
/// after construction.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub(crate) crawler_user_agents: Vec<String>,
    pub(crate) extensions_to_ignore: Vec<String>,
    pub(crate) allowlist: Option<Vec<Regex>>,
    pub(crate) denylist: Option<Vec<Regex>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierConfig {
    /// Default crawler and extension tables, no allow/deny lists.
    pub fn new() -> Self {
        Self {
            crawler_user_agents: DEFAULT_CRAWLER_USER_AGENTS
                .iter()
                .map(|ua| ua.to_string())
                .collect(),
            extensions_to_ignore: DEFAULT_EXTENSIONS_TO_IGNORE
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            allowlist: None,
            denylist: None,
        }
    }

    /// Replace the crawler user-agent table. Entries are stored
    /// lowercased; matching is substring containment, not regex.
    pub fn with_crawler_user_agents(mut self, agents: &[impl AsRef<str>]) -> Self {
        self.crawler_user_agents = agents
            .iter()
            .map(|ua| ua.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Replace the ignored-extension table (case-sensitive suffix match).
    pub fn with_extensions_to_ignore(mut self, extensions: &[impl AsRef<str>]) -> Self {
        self.extensions_to_ignore = extensions
            .iter()
            .map(|ext| ext.as_ref().to_string())
            .collect();
        self
    }

    /// Restrict delegation to paths matching at least one pattern.
    /// An empty slice leaves the allow-list unset.
    pub fn with_allowlist(mut self, patterns: &[impl AsRef<str>]) -> Result<Self, PrerenderError> {
        self.allowlist = if patterns.is_empty() {
            None
        } else {
            Some(compile_patterns(patterns)?)
        };
        Ok(self)
    }

    /// Exclude paths matching any pattern, regardless of the allow-list.
    /// An empty slice leaves the deny-list unset.
    pub fn with_denylist(mut self, patterns: &[impl AsRef<str>]) -> Result<Self, PrerenderError> {
        self.denylist = if patterns.is_empty() {
            None
        } else {
            Some(compile_patterns(patterns)?)
        };
        Ok(self)
    }
}

/// Connection settings for the rendering service, built once at startup.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the rendering service.
    pub service_url: String,
    /// Basic-auth username; auth is sent only when the password is also set.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Value for the `x-prerender-token` header.
    pub token: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            username: None,
            password: None,
            token: None,
        }
    }
}

impl UpstreamConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PRERENDER_SERVICE_URL` (optional, defaults to the public service)
    /// - `PRERENDER_SERVICE_USERNAME` (optional)
    /// - `PRERENDER_SERVICE_PASSWORD` (optional)
    /// - `PRERENDER_SERVICE_TOKEN` (optional)
    ///
    /// Resolved once at startup; never re-read per request. Explicit
    /// setter calls override what the environment provided.
    pub fn from_env() -> Self {
        Self {
            service_url: std::env::var("PRERENDER_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            username: std::env::var("PRERENDER_SERVICE_USERNAME").ok(),
            password: std::env::var("PRERENDER_SERVICE_PASSWORD").ok(),
            token: std::env::var("PRERENDER_SERVICE_TOKEN").ok(),
        }
    }

    pub fn with_service_url(mut self, url: &str) -> Self {
        self.service_url = url.to_string();
        self
    }

    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}
