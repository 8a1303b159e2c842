mod body;
mod transport;

use async_trait::async_trait;
use reqwest::{Client, redirect};
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::Outcome;

use super::classify::{TransportError, TransportFault, classify};
use super::spec::{ClientSettings, RequestSpec};

pub use body::MAX_BODY_BYTES;

use body::read_capped_body;
use transport::transport_error;

/// Performs one request and reports its classified outcome.
///
/// Implementations never fail: every problem is folded into the returned
/// [`Outcome`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, spec: &RequestSpec) -> Outcome;
}

#[async_trait]
impl<F> RequestExecutor for F
where
    F: Fn(&RequestSpec) -> Outcome + Send + Sync,
{
    async fn execute(&self, spec: &RequestSpec) -> Outcome {
        self(spec)
    }
}

/// reqwest-backed executor. One client is shared by every request of a run.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    target: Result<Url, TransportError>,
}

impl HttpExecutor {
    /// Builds the shared client and parses the target once.
    ///
    /// A malformed URL is not an error here; each request reports it instead.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(spec: &RequestSpec, settings: &ClientSettings) -> AppResult<Self> {
        let mut client_builder = Client::builder()
            .timeout(spec.timeout)
            .connect_timeout(settings.connect_timeout.min(spec.timeout))
            .pool_max_idle_per_host(spec.concurrency.get())
            .user_agent(settings.user_agent.as_str());

        if settings.redirect_limit == 0 {
            client_builder = client_builder.redirect(redirect::Policy::none());
        } else {
            client_builder = client_builder.redirect(redirect::Policy::limited(
                usize::try_from(settings.redirect_limit).unwrap_or(10),
            ));
        }

        let client = client_builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        let target = Url::parse(spec.url.trim()).map_err(|err| {
            TransportError::new(format!("parse \"{}\": {}", spec.url, err))
                .with_fault(TransportFault::InvalidUrl)
        });
        if let Err(err) = &target {
            debug!("Target URL rejected: {}", err);
        }

        Ok(Self { client, target })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, spec: &RequestSpec) -> Outcome {
        let start = Instant::now();
        let url = match &self.target {
            Ok(url) => url.clone(),
            Err(err) => {
                let classification = classify(
                    Some(err),
                    0,
                    spec.expected_status,
                    &spec.expected_body,
                    "",
                );
                return Outcome::new(0, start.elapsed(), classification, 0);
            }
        };

        let mut observed_status = 0u16;
        let attempt = tokio::time::timeout(
            spec.timeout,
            fetch(&self.client, url, &mut observed_status),
        )
        .await;
        let elapsed = start.elapsed();

        let (failure, body) = match attempt {
            Ok(Ok(body)) => (None, body),
            Ok(Err(failure)) => (Some(failure.error), failure.partial_body),
            Err(_elapsed) => (Some(TransportError::deadline_exceeded()), Vec::new()),
        };

        let observed_body = String::from_utf8_lossy(&body);
        let classification = classify(
            failure.as_ref(),
            observed_status,
            spec.expected_status,
            &spec.expected_body,
            &observed_body,
        );
        let response_bytes = u64::try_from(body.len()).unwrap_or(u64::MAX);
        Outcome::new(observed_status, elapsed, classification, response_bytes)
    }
}

struct FetchFailure {
    error: TransportError,
    partial_body: Vec<u8>,
}

async fn fetch(client: &Client, url: Url, status: &mut u16) -> Result<Vec<u8>, FetchFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| FetchFailure {
            error: transport_error(err),
            partial_body: Vec::new(),
        })?;
    *status = response.status().as_u16();

    read_capped_body(response, MAX_BODY_BYTES)
        .await
        .map_err(|err| FetchFailure {
            error: transport_error(err.source),
            partial_body: err.partial_body,
        })
}
