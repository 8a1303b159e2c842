use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Dispatcher coordinator failed: {source}")]
    DispatcherJoinFailed {
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Stats collector failed: {source}")]
    CollectorJoinFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}
