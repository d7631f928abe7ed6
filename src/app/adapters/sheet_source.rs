//! Sheet fetching
//!
//! [`SheetSource`] is the transport seam: given a URL it returns the body
//! text. [`SheetLoader`] adds the policy around it: a per-request timeout,
//! cancellation, a bounded retry schedule and the proxy-then-direct route
//! used for sheets that are not always reachable directly.

use crate::config::{NetworkConfig, RetryPolicy};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Something that can fetch a sheet's text by URL
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the body at `url`; non-success statuses are errors
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Name used in logs
    fn name(&self) -> &str {
        "SheetSource"
    }
}

// =============================================================================
// HTTP source
// =============================================================================

/// Fetches sheets over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: reqwest::Client,
}

impl HttpSheetSource {
    /// Create a source whose client enforces `timeout` per request
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport("", "Failed to build HTTP client", Some(e)))?;

        Ok(Self { client })
    }

    pub fn from_config(network: &NetworkConfig) -> Result<Self> {
        Self::new(network.timeout())
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::transport(url, "request timed out", Some(e))
            } else {
                Error::transport(url, "request failed", Some(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Error::transport(url, "failed to read response body", Some(e)))
    }

    fn name(&self) -> &str {
        "HttpSheetSource"
    }
}

// =============================================================================
// Static source
// =============================================================================

/// Serves fixed bodies from memory
///
/// Unknown URLs answer 404. Individual URLs can be made to fail a number of
/// times before succeeding, and every response can be delayed, which makes
/// this source suitable for exercising retry and timeout behaviour.
#[derive(Debug, Default)]
pub struct StaticSheetSource {
    bodies: HashMap<String, String>,
    failures: Mutex<HashMap<String, u32>>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl StaticSheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url`
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Fail the first `count` requests to `url` with a transport error
    pub fn with_failures(self, url: impl Into<String>, count: u32) -> Self {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(url.into(), count);
        }
        self
    }

    /// Wait this long before answering any request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SheetSource for StaticSheetSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let should_fail = match self.failures.lock() {
            Ok(mut failures) => match failures.get_mut(url) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            },
            Err(_) => false,
        };
        if should_fail {
            return Err(Error::transport(url, "scripted failure", None));
        }

        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http_status(url, 404))
    }

    fn name(&self) -> &str {
        "StaticSheetSource"
    }
}

// =============================================================================
// Loader
// =============================================================================

/// How a sheet URL is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRoute {
    /// Request the URL itself
    Direct,
    /// Try the URL through a proxy prefix first, then directly
    ProxyThenDirect { proxy_prefix: String },
}

impl FetchRoute {
    /// Proxied form of a URL: the prefix followed by the encoded target
    pub fn proxied_url(proxy_prefix: &str, url: &str) -> String {
        format!("{}{}", proxy_prefix, urlencoding::encode(url))
    }
}

/// Fetches sheets with timeout, retry and cancellation
#[derive(Clone)]
pub struct SheetLoader {
    source: Arc<dyn SheetSource>,
    retry: RetryPolicy,
    timeout: Duration,
    cancellation: CancellationToken,
}

impl SheetLoader {
    pub fn new(source: Arc<dyn SheetSource>, retry: RetryPolicy, timeout: Duration) -> Self {
        Self {
            source,
            retry,
            timeout,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn from_config(source: Arc<dyn SheetSource>, network: &NetworkConfig) -> Self {
        Self::new(source, network.retry.clone(), network.timeout())
    }

    /// Tie in-flight fetches to an outer lifecycle
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Fetch a sheet, retrying the whole route on failure
    ///
    /// Each attempt runs the route once; a proxy failure inside an attempt
    /// falls through to the direct request immediately. Between attempts
    /// the loader waits according to the retry policy. Cancellation is
    /// never retried.
    pub async fn fetch(&self, url: &str, route: &FetchRoute) -> Result<String> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if self.cancellation.is_cancelled() {
                return Err(Error::cancelled(format!("fetch of {} cancelled", url)));
            }

            match self.fetch_route(url, route).await {
                Ok(text) => {
                    info!(
                        "Fetched {} bytes from {} (attempt {}/{})",
                        text.len(),
                        url,
                        attempt,
                        max_attempts
                    );
                    return Ok(text);
                }
                Err(e @ Error::Cancelled { .. }) => return Err(e),
                Err(e) => {
                    warn!(
                        "Attempt {}/{} to fetch {} failed: {}",
                        attempt, max_attempts, url, e
                    );
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts {
                let delay = self.retry.delay_for_attempt(attempt);
                debug!("Retrying {} in {:?}", url, delay);
                tokio::select! {
                    _ = self.cancellation.cancelled() => {
                        return Err(Error::cancelled(format!("fetch of {} cancelled", url)));
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::transport(url, "no fetch attempt was made", None)))
    }

    async fn fetch_route(&self, url: &str, route: &FetchRoute) -> Result<String> {
        match route {
            FetchRoute::Direct => self.fetch_once(url).await,
            FetchRoute::ProxyThenDirect { proxy_prefix } => {
                let proxied = FetchRoute::proxied_url(proxy_prefix, url);
                match self.fetch_once(&proxied).await {
                    Ok(text) => Ok(text),
                    Err(e @ Error::Cancelled { .. }) => Err(e),
                    Err(e) => {
                        warn!("Proxy fetch failed ({}), trying direct", e);
                        self.fetch_once(url).await
                    }
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        tokio::select! {
            _ = self.cancellation.cancelled() => {
                Err(Error::cancelled(format!("fetch of {} cancelled", url)))
            }
            result = tokio::time::timeout(self.timeout, self.source.fetch_text(url)) => {
                match result {
                    Ok(inner) => inner,
                    Err(_) => Err(Error::timeout(url, self.timeout)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "https://sheets.example/reviews.tsv";
    const PROXY: &str = "https://proxy.example/raw?url=";

    fn fast_retry(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff_ms: 1,
            backoff_multiplier: 1.0,
            max_backoff_ms: 1,
        }
    }

    fn proxy_route() -> FetchRoute {
        FetchRoute::ProxyThenDirect {
            proxy_prefix: PROXY.to_string(),
        }
    }

    #[test]
    fn test_proxied_url_encodes_target() {
        assert_eq!(
            FetchRoute::proxied_url(PROXY, "https://a.example/x?gid=0&output=tsv"),
            "https://proxy.example/raw?url=https%3A%2F%2Fa.example%2Fx%3Fgid%3D0%26output%3Dtsv"
        );
    }

    #[tokio::test]
    async fn test_direct_fetch() {
        let source = Arc::new(StaticSheetSource::new().with_body(SHEET, "a\tb"));
        let loader = SheetLoader::new(source.clone(), fast_retry(1), Duration::from_secs(1));

        let text = loader.fetch(SHEET, &FetchRoute::Direct).await.unwrap();
        assert_eq!(text, "a\tb");
        assert_eq!(source.requests(), vec![SHEET.to_string()]);
    }

    #[tokio::test]
    async fn test_proxy_success_skips_direct() {
        let proxied = FetchRoute::proxied_url(PROXY, SHEET);
        let source = Arc::new(StaticSheetSource::new().with_body(proxied.clone(), "via proxy"));
        let loader = SheetLoader::new(source.clone(), fast_retry(1), Duration::from_secs(1));

        let text = loader.fetch(SHEET, &proxy_route()).await.unwrap();
        assert_eq!(text, "via proxy");
        assert_eq!(source.requests(), vec![proxied]);
    }

    #[tokio::test]
    async fn test_proxy_failure_falls_back_to_direct() {
        let source = Arc::new(StaticSheetSource::new().with_body(SHEET, "direct"));
        let loader = SheetLoader::new(source.clone(), fast_retry(1), Duration::from_secs(1));

        let text = loader.fetch(SHEET, &proxy_route()).await.unwrap();
        assert_eq!(text, "direct");
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let source = Arc::new(
            StaticSheetSource::new()
                .with_body(SHEET, "ok")
                .with_failures(SHEET, 2),
        );
        let loader = SheetLoader::new(source.clone(), fast_retry(3), Duration::from_secs(1));

        assert_eq!(loader.fetch(SHEET, &FetchRoute::Direct).await.unwrap(), "ok");
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let source = Arc::new(StaticSheetSource::new());
        let loader = SheetLoader::new(source.clone(), fast_retry(2), Duration::from_secs(1));

        let err = loader.fetch(SHEET, &FetchRoute::Direct).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert!(err.is_transport());
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let source = Arc::new(
            StaticSheetSource::new()
                .with_body(SHEET, "late")
                .with_delay(Duration::from_millis(200)),
        );
        let loader = SheetLoader::new(source, fast_retry(1), Duration::from_millis(20));

        let err = loader.fetch(SHEET, &FetchRoute::Direct).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Timeout { elapsed, .. } if elapsed == Duration::from_millis(20)
        ));
        assert!(err.to_string().starts_with("Timed out after 20ms"));
    }

    #[tokio::test]
    async fn test_cancelled_loader_does_not_fetch() {
        let source = Arc::new(StaticSheetSource::new().with_body(SHEET, "x"));
        let token = CancellationToken::new();
        let loader = SheetLoader::new(source.clone(), fast_retry(3), Duration::from_secs(1))
            .with_cancellation(token.clone());

        token.cancel();
        let err = loader.fetch(SHEET, &FetchRoute::Direct).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_in_flight_fetch() {
        let source = Arc::new(
            StaticSheetSource::new()
                .with_body(SHEET, "never")
                .with_delay(Duration::from_secs(30)),
        );
        let token = CancellationToken::new();
        let loader = SheetLoader::new(source, fast_retry(3), Duration::from_secs(60))
            .with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let err = loader.fetch(SHEET, &proxy_route()).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
        canceller.await.unwrap();
    }
}
