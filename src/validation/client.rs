use async_trait::async_trait;
use futures::{StreamExt, stream};
use log::{debug, warn};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tokio::time::{Duration, sleep};

use crate::config::Config;
use crate::core::constants::{reasons, service};
use crate::core::error::Result;
use crate::core::types::{LinkResult, StatsData};
use crate::reporting::logging;
use crate::validation::normalizer::{
    ServiceResponse, normalize_bulk, normalize_single, transport_failure, unknown_for_all,
};

/// Remote link verification.
///
/// Every method resolves to verdicts: transport and decoding failures are
/// folded into `unknown` results instead of being returned as errors.
#[async_trait]
pub trait VerifyLinks {
    /// Check many links in one request, one verdict per submitted link.
    async fn check_bulk(&self, links: &[String]) -> Vec<LinkResult>;

    /// Check one link on its own.
    async fn check_single(&self, link: &str) -> LinkResult;

    /// Aggregate service counters; zeros when unavailable.
    async fn fetch_stats(&self) -> StatsData;
}

#[derive(Serialize)]
struct BulkRequest<'a> {
    links: &'a [String],
}

/// HTTP client for the verification service.
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    client: reqwest::Client,
    base_url: String,
    retry_attempts: u8,
    retry_delay: Duration,
}

impl RemoteVerifier {
    pub fn from_config(config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(user_agent);

        if config.skip_ssl_verification.unwrap_or(false) {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = config.proxy {
            client_builder = client_builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts.unwrap_or(0),
            retry_delay: config.retry_delay_duration(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send the request built by `build`, retrying transport errors.
    ///
    /// Non-2xx responses are turned into errors but never retried.
    async fn send_with_retry<F>(&self, build: F) -> reqwest::Result<Response>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempts = 0;
        loop {
            match build().send().await {
                Ok(response) => return response.error_for_status(),
                Err(err) if attempts < self.retry_attempts => {
                    attempts += 1;
                    debug!(
                        "Request failed ({err}), retry {attempts}/{}",
                        self.retry_attempts
                    );
                    sleep(self.retry_delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Innermost cause of a reqwest error, which is usually the readable one.
fn describe_error(err: &reqwest::Error) -> String {
    std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[async_trait]
impl VerifyLinks for RemoteVerifier {
    async fn check_bulk(&self, links: &[String]) -> Vec<LinkResult> {
        let clean: Vec<String> = links
            .iter()
            .map(|link| link.trim())
            .filter(|link| !link.is_empty())
            .map(String::from)
            .collect();

        if clean.is_empty() {
            return Vec::new();
        }

        let body = BulkRequest { links: &clean };
        let url = self.endpoint("/");

        let response = match self
            .send_with_retry(|| self.client.post(&url).json(&body))
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let detail = describe_error(&err);
                warn!("Bulk check failed: {detail}");
                return transport_failure(&clean, &detail);
            }
        };

        let results = match response.json::<Value>().await {
            Ok(value) => normalize_bulk(ServiceResponse::from_value(&value), &clean),
            Err(err) => {
                warn!("Bulk response was not JSON: {err}");
                unknown_for_all(&clean, reasons::INVALID_API_RESPONSE)
            }
        };

        results.iter().for_each(logging::log_link_result);
        results
    }

    async fn check_single(&self, link: &str) -> LinkResult {
        let clean = link.trim();
        let url = self.endpoint("/");

        let result = match self
            .send_with_retry(|| {
                self.client
                    .get(&url)
                    .query(&[(service::LINK_QUERY_PARAM, clean)])
            })
            .await
        {
            Ok(response) => match response.json::<Value>().await {
                Ok(body) => normalize_single(clean, &body),
                Err(err) => {
                    warn!("Single check response was not JSON: {err}");
                    LinkResult::unknown(clean, reasons::INVALID_API_RESPONSE)
                }
            },
            Err(err) => {
                let detail = describe_error(&err);
                warn!("Single check failed for {clean}: {detail}");
                LinkResult::unknown(clean, detail)
            }
        };

        logging::log_link_result(&result);
        result
    }

    async fn fetch_stats(&self) -> StatsData {
        let url = self.endpoint(service::STATS_PATH);

        let response = match self.send_with_retry(|| self.client.get(&url)).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Failed to fetch stats: {}", describe_error(&err));
                return StatsData::default();
            }
        };

        match response.json::<StatsData>().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!("Failed to decode stats: {err}");
                StatsData::default()
            }
        }
    }
}

/// Check each link on its own with at most `concurrency` requests in
/// flight. Results keep the order of `links`.
pub async fn check_each<V>(verifier: &V, links: &[String], concurrency: usize) -> Vec<LinkResult>
where
    V: VerifyLinks + Sync + ?Sized,
{
    stream::iter(links)
        .map(|link| verifier.check_single(link))
        .buffered(concurrency.max(1))
        .collect()
        .await
}
