use crate::error::Result;
use log::warn;
use reqwest::{Client, Proxy, RequestBuilder, redirect::Policy};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

const API_BASE: &str = "https://api.paws.community/v1";

/// Attempt-count retry with a fixed delay; no distinction between
/// transport errors, timeouts and bad statuses.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Per-account HTTP client. The proxy (when configured) is baked into the
/// underlying `reqwest::Client`, so every attempt of every request for
/// this account is routed through it.
pub struct ApiClient {
    http: Client,
    retry: RetryPolicy,
    base: String,
}

impl ApiClient {
    pub fn new(proxy: Option<&str>) -> Result<Self> {
        Self::with_retry(proxy, RetryPolicy::default())
    }

    pub fn with_retry(proxy: Option<&str>, retry: RetryPolicy) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30));
        if let Some(uri) = proxy {
            // a malformed proxy line is a config error, not a connect failure
            Url::parse(uri)?;
            builder = builder.proxy(Proxy::all(uri)?);
        }
        Ok(Self {
            http: builder.build()?,
            retry,
            base: API_BASE.to_string(),
        })
    }

    /// Client pointed at a local stand-in server instead of the live API.
    #[cfg(test)]
    pub(crate) fn with_base(base: String, retry: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            retry,
            base,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(format!("{}{path}", self.base))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(format!("{}{path}", self.base))
    }

    /// Runs `op`, retrying on any error while attempts remain. The final
    /// attempt's error is propagated unchanged.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.retry.attempts => {
                    warn!(
                        "request failed (attempt {attempt}/{}), retrying: {err}",
                        self.retry.attempts
                    );
                    attempt += 1;
                    sleep(self.retry.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_client() -> ApiClient {
        ApiClient::with_retry(
            None,
            RetryPolicy {
                attempts: 3,
                delay: Duration::from_millis(1),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn exhausts_three_attempts_then_propagates() {
        let client = fast_client();
        let calls = AtomicU32::new(0);

        let result: Result<()> = client
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::Api("down".to_string())) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(Error::Api(msg)) if msg == "down"));
    }

    #[tokio::test]
    async fn success_on_second_attempt_short_circuits() {
        let client = fast_client();
        let calls = AtomicU32::new(0);

        let result = client
            .execute(|| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt < 2 {
                        Err(Error::Api("flaky".to_string()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn first_success_makes_a_single_call() {
        let client = fast_client();
        let calls = AtomicU32::new(0);

        client
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn malformed_proxy_uri_is_rejected() {
        assert!(ApiClient::new(Some("not a proxy")).is_err());
    }
}
