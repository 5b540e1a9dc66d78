// ── Bounded-retry fetcher ──
//
// Wraps a `DataSource` with the retry policy the pipeline relies on. Remote
// error statuses are never raised: after the retry budget is spent the last
// payload is handed back as-is and the ingestion layer decides whether it is
// usable. A transport failure that outlives the retry comes back as a null
// payload. Only rejected credentials propagate.

use std::future::Future;
use std::time::Duration;

use centraldoc_api::{ApiResponse, DataSource};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::CoreError;
use crate::payload::{Page, Payload};

/// Retry policy for one request method.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Wait before the first retry.
    pub delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff: f32,
    /// Whether HTTP 404 is worth another attempt.
    pub retry_not_found: bool,
}

impl RetryPolicy {
    /// GET: one retry after 2 s, not-found is terminal.
    pub fn get() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_secs(2),
            backoff: 1.0,
            retry_not_found: false,
        }
    }

    /// POST: one retry after 2 s on every error status.
    pub fn post() -> Self {
        Self {
            retry_not_found: true,
            ..Self::get()
        }
    }

    /// Same policy with a different retry delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::get()
    }
}

#[derive(Clone, Copy)]
enum Verb {
    Get,
    Post,
}

impl Verb {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Retrying front-end over a [`DataSource`].
pub struct Fetcher<S> {
    source: S,
    get_policy: RetryPolicy,
    post_policy: RetryPolicy,
}

impl<S: DataSource + Sync> Fetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            get_policy: RetryPolicy::get(),
            post_policy: RetryPolicy::post(),
        }
    }

    #[must_use]
    pub fn with_policies(mut self, get: RetryPolicy, post: RetryPolicy) -> Self {
        self.get_policy = get;
        self.post_policy = post;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// `GET path` under the GET retry policy.
    pub async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value, CoreError> {
        self.run(Verb::Get, path, &self.get_policy, || {
            self.source.get(path, params)
        })
        .await
    }

    /// `POST path` under the POST retry policy.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, CoreError> {
        self.run(Verb::Post, path, &self.post_policy, || {
            self.source.post(path, body)
        })
        .await
    }

    async fn run<F, Fut>(
        &self,
        verb: Verb,
        path: &str,
        policy: &RetryPolicy,
        mut call: F,
    ) -> Result<Value, CoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<ApiResponse, centraldoc_api::Error>>,
    {
        let mut attempt = 1;
        let mut delay = policy.delay;

        loop {
            let outcome = call().await;
            let last = attempt >= policy.max_attempts.max(1);

            match outcome {
                Err(e) if e.is_auth_expired() => return Err(e.into()),
                Ok(resp) if resp.is_success() => {
                    if attempt > 1 {
                        warn!(
                            "Retried {} request for {path} status code {}",
                            verb.as_str(),
                            resp.status
                        );
                    }
                    return Ok(resp.payload);
                }
                Ok(resp) if resp.is_not_found() && !policy.retry_not_found => {
                    warn!(
                        "{} request for {path} status code {} {}",
                        verb.as_str(),
                        resp.status,
                        resp.detail().unwrap_or_default()
                    );
                    return Ok(resp.payload);
                }
                Ok(resp) if last => {
                    warn!(
                        "Retried {} request for {path} status code {} {}",
                        verb.as_str(),
                        resp.status,
                        resp.detail().unwrap_or_default()
                    );
                    return Ok(resp.payload);
                }
                Err(e) if last => {
                    error!(
                        error = %e,
                        "Retried {} request for {path} without a response, continuing with an empty payload",
                        verb.as_str()
                    );
                    return Ok(Value::Null);
                }
                Ok(resp) => warn!(
                    "Retrying {} request for {path} status code {} {}",
                    verb.as_str(),
                    resp.status,
                    resp.detail().unwrap_or_default()
                ),
                Err(e) => warn!(
                    error = %e,
                    "Retrying {} request for {path} after transport failure",
                    verb.as_str()
                ),
            }

            tokio::time::sleep(delay).await;
            delay = delay.mul_f32(policy.backoff.max(0.0));
            attempt += 1;
        }
    }

    /// Walk a paged listing until the reported total is reached or a page
    /// comes back empty.
    ///
    /// A malformed first page makes the whole listing malformed; a malformed
    /// or unreachable later page ends the walk with what was collected so far.
    pub async fn fetch_paged<T>(
        &self,
        path: &str,
        params: &[(&str, String)],
        limit: usize,
        ingest: impl Fn(Value) -> Payload<Page<T>>,
    ) -> Result<Payload<Page<T>>, CoreError> {
        let mut collected: Vec<T> = Vec::new();
        let mut total = None;
        let mut offset = 0usize;

        loop {
            let mut page_params: Vec<(&str, String)> = params.to_vec();
            page_params.push(("offset", offset.to_string()));
            page_params.push(("limit", limit.to_string()));

            let raw = self.fetch(path, &page_params).await?;
            let page = match ingest(raw) {
                Payload::Parsed(page) => page,
                Payload::Malformed(raw) if offset == 0 => return Ok(Payload::Malformed(raw)),
                Payload::Malformed(_) => {
                    warn!(path, offset, "malformed page, stopping pagination");
                    break;
                }
            };

            let received = page.items.len();
            total = page.total.or(total);
            collected.extend(page.items);
            offset += received;
            debug!(path, offset, ?total, "fetched page");

            let done = match total {
                Some(total) => offset >= total,
                None => received < limit,
            };
            if received == 0 || done {
                break;
            }
        }

        Ok(Payload::Parsed(Page {
            items: collected,
            total,
        }))
    }
}
