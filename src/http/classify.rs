//! Maps transport failures and response mismatches onto [`ErrorKind`].
//!
//! Classification is a pure function of its inputs. Several transport
//! conditions can hold at once (a connect timeout is both a timeout and a
//! dial failure), so the checks run in a fixed order and the first match
//! wins.
use std::fmt;

use serde::Serialize;

/// Closed set of reasons a request did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "DNS")]
    Dns,
    #[serde(rename = "Connection")]
    Connection,
    #[serde(rename = "Timeout")]
    Timeout,
    #[serde(rename = "TLS")]
    Tls,
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "Network")]
    Network,
    #[serde(rename = "Server Error")]
    ServerError,
    #[serde(rename = "Client Error")]
    ClientError,
    #[serde(rename = "Redirect")]
    Redirect,
    #[serde(rename = "HTTP Status")]
    HttpStatus,
    #[serde(rename = "Body Validation")]
    BodyValidation,
}

impl ErrorKind {
    #[cfg(test)]
    pub const ALL: [ErrorKind; 12] = [
        ErrorKind::None,
        ErrorKind::Dns,
        ErrorKind::Connection,
        ErrorKind::Timeout,
        ErrorKind::Tls,
        ErrorKind::Url,
        ErrorKind::Network,
        ErrorKind::ServerError,
        ErrorKind::ClientError,
        ErrorKind::Redirect,
        ErrorKind::HttpStatus,
        ErrorKind::BodyValidation,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::None => "none",
            ErrorKind::Dns => "DNS",
            ErrorKind::Connection => "Connection",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Tls => "TLS",
            ErrorKind::Url => "URL",
            ErrorKind::Network => "Network",
            ErrorKind::ServerError => "Server Error",
            ErrorKind::ClientError => "Client Error",
            ErrorKind::Redirect => "Redirect",
            ErrorKind::HttpStatus => "HTTP Status",
            ErrorKind::BodyValidation => "Body Validation",
        }
    }

    /// True for failures where no usable response was obtained.
    #[must_use]
    pub const fn is_transport(self) -> bool {
        matches!(
            self,
            ErrorKind::Dns
                | ErrorKind::Connection
                | ErrorKind::Timeout
                | ErrorKind::Tls
                | ErrorKind::Url
                | ErrorKind::Network
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers a transport failure can carry. More than one may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFault {
    /// The transport reported a timeout (connect, read, or total).
    Timeout,
    /// Name resolution failed.
    Dns,
    /// Establishing the connection failed.
    Dial,
    /// The target could not be turned into a request.
    InvalidUrl,
    /// The run's own hard deadline for the request expired.
    DeadlineExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
    faults: Vec<TransportFault>,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            faults: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fault(mut self, fault: TransportFault) -> Self {
        if !self.faults.contains(&fault) {
            self.faults.push(fault);
        }
        self
    }

    #[must_use]
    pub fn deadline_exceeded() -> Self {
        Self::new("deadline exceeded").with_fault(TransportFault::DeadlineExceeded)
    }

    #[must_use]
    pub fn has(&self, fault: TransportFault) -> bool {
        self.faults.contains(&fault)
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn mentions_tls(&self) -> bool {
        let lowered = self.message.to_ascii_lowercase();
        lowered.contains("tls") || lowered.contains("certificate")
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub message: String,
}

impl Classification {
    const fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    #[must_use]
    pub const fn success() -> Self {
        Self {
            kind: ErrorKind::None,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == ErrorKind::None
    }
}

/// Classifies one request attempt.
///
/// `expected_body` is only checked when non-empty. `observed_status` is 0
/// when no response was received.
#[must_use]
pub fn classify(
    transport_error: Option<&TransportError>,
    observed_status: u16,
    expected_status: u16,
    expected_body: &str,
    observed_body: &str,
) -> Classification {
    if let Some(err) = transport_error {
        return classify_transport(err);
    }

    if observed_status != expected_status {
        return classify_status(observed_status, expected_status);
    }

    if !expected_body.is_empty() && !observed_body.contains(expected_body) {
        return Classification::new(
            ErrorKind::BodyValidation,
            format!(
                "Response body doesn't contain expected text: '{}'",
                expected_body
            ),
        );
    }

    Classification::success()
}

fn classify_transport(err: &TransportError) -> Classification {
    if err.has(TransportFault::Timeout) {
        return Classification::new(ErrorKind::Timeout, format!("Request timeout: {}", err));
    }
    if err.has(TransportFault::Dns) {
        return Classification::new(ErrorKind::Dns, format!("DNS resolution failed: {}", err));
    }
    if err.has(TransportFault::Dial) {
        return Classification::new(ErrorKind::Connection, format!("Connection failed: {}", err));
    }
    if err.has(TransportFault::InvalidUrl) {
        return Classification::new(ErrorKind::Url, format!("Invalid URL: {}", err));
    }
    if err.mentions_tls() {
        return Classification::new(ErrorKind::Tls, format!("TLS/SSL error: {}", err));
    }
    if err.has(TransportFault::DeadlineExceeded) {
        return Classification::new(ErrorKind::Timeout, "Request deadline exceeded".to_owned());
    }
    Classification::new(ErrorKind::Network, format!("Network error: {}", err))
}

fn classify_status(observed: u16, expected: u16) -> Classification {
    match observed {
        500.. => Classification::new(
            ErrorKind::ServerError,
            format!("Server error (HTTP {})", observed),
        ),
        400..=499 => Classification::new(
            ErrorKind::ClientError,
            format!("Client error (HTTP {})", observed),
        ),
        300..=399 => Classification::new(
            ErrorKind::Redirect,
            format!("Unexpected redirect (HTTP {})", observed),
        ),
        0..=299 => Classification::new(
            ErrorKind::HttpStatus,
            format!(
                "Unexpected status code: {} (expected {})",
                observed, expected
            ),
        ),
    }
}
