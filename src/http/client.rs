use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, Url};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::SyncError;
use crate::resource::StatusResource;
use crate::sync::{StateApi, StateSnapshot};

/// reqwest-backed state API with outbound throttling.
///
/// Relative URLs are resolved against the status resource. The throttle only
/// spaces requests out; nothing is ever retried.
#[derive(Debug)]
pub struct HttpStateApi {
    client: Client,
    resource: StatusResource,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl HttpStateApi {
    /// Create a client for `resource` using the given settings
    pub fn new(resource: StatusResource, settings: &ClientConfig) -> Result<Self, reqwest::Error> {
        let per_second = NonZeroU32::new(settings.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(settings.burst_capacity).unwrap_or(per_second);
        let rate_limiter = Arc::new(RateLimiter::direct(
            Quota::per_second(per_second).allow_burst(burst),
        ));

        // No timeout unless one is configured; the transport defaults apply otherwise
        let mut builder = Client::builder().user_agent(concat!("state-sync/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = settings.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            resource,
            rate_limiter,
        })
    }

    pub fn resource(&self) -> &StatusResource {
        &self.resource
    }

    /// Download the bytes behind an image source such as the rendered
    /// diagram URL.
    pub async fn download(&self, src: &str) -> Result<Vec<u8>, SyncError> {
        let url = self.resource.resolve(src)?;
        let response = self.send(self.client.get(url.clone()), &url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SyncError::from_reqwest(url.as_str(), e))?;
        debug!(url = %url, bytes = bytes.len(), "Downloaded resource");
        Ok(bytes.to_vec())
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<Response, SyncError> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(10)))
            .await;

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl StateApi for HttpStateApi {
    async fn refresh(&self, status_url: &str) -> Result<StateSnapshot, SyncError> {
        let url = self.resource.resolve(status_url)?;
        debug!(url = %url, "GET status");

        let response = self
            .send(self.client.get(url.clone()).header(ACCEPT, "application/json"), &url)
            .await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::from_reqwest(url.as_str(), e))?;

        serde_json::from_slice(&body).map_err(|e| SyncError::Decode {
            url: url.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            reason: e.to_string(),
        })
    }

    async fn trigger(&self, event_url: &str) -> Result<(), SyncError> {
        let url = self.resource.resolve(event_url)?;
        debug!(url = %url, "PUT event");

        let response = self.send(self.client.put(url.clone()), &url).await?;
        debug!(url = %url, status = response.status().as_u16(), "Event accepted");
        Ok(())
    }
}
