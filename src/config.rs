//! Environment-driven configuration.
//!
//! Every setting except the API token has a baked-in default, so the
//! common deployment is "set `STARS_API_TOKEN` and run". The overrides
//! exist mainly so test harnesses can point the sync at a local mock
//! server.
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://api-stars.github.com/";
const DEFAULT_BLOG_FEED_URL: &str = "https://www.willianjusten.com.br/feed.xml";
const DEFAULT_VIDEO_FEED_URL: &str =
    "https://www.youtube.com/feeds/videos.xml?channel_id=UCa12brLWzCqnxN0KOyjfmJQ";

const TOKEN_VAR: &str = "STARS_API_TOKEN";
const API_URL_VAR: &str = "STARS_API_URL";
const BLOG_FEED_VAR: &str = "BLOG_FEED_URL";
const VIDEO_FEED_VAR: &str = "VIDEO_FEED_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STARS_API_TOKEN environment variable is not set")]
    MissingToken,

    #[error("invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Runtime configuration, read once at startup and held read-only for the
/// run.
///
/// The custom `Debug` impl masks the token so it cannot leak through
/// logs, error messages, or debug output.
pub struct Config {
    /// GraphQL endpoint of the Stars API.
    pub api_url: Url,
    /// RSS feed listing blog posts.
    pub blog_feed_url: Url,
    /// Atom feed listing video uploads.
    pub video_feed_url: Url,
    /// Bearer credential for the Stars API.
    pub token: SecretString,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("blog_feed_url", &self.blog_feed_url.as_str())
            .field("video_feed_url", &self.video_feed_url.as_str())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// - `STARS_API_TOKEN` is required; missing or blank →
    ///   `ConfigError::MissingToken`.
    /// - `STARS_API_URL`, `BLOG_FEED_URL`, `VIDEO_FEED_URL` override the
    ///   defaults when set; an unparseable override →
    ///   `ConfigError::InvalidUrl`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = match std::env::var(TOKEN_VAR) {
            Ok(raw) if !raw.trim().is_empty() => SecretString::from(raw),
            _ => return Err(ConfigError::MissingToken),
        };

        Ok(Self {
            api_url: url_from_env(API_URL_VAR, DEFAULT_API_URL)?,
            blog_feed_url: url_from_env(BLOG_FEED_VAR, DEFAULT_BLOG_FEED_URL)?,
            video_feed_url: url_from_env(VIDEO_FEED_VAR, DEFAULT_VIDEO_FEED_URL)?,
            token,
        })
    }
}

fn url_from_env(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}

// ============================================================================
// Tests
// ============================================================================
