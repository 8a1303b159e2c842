use std::error::Error as _;

use super::super::classify::{TransportError, TransportFault};

const DNS_MARKERS: [&str; 5] = [
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
    "nodename nor servname",
];

/// Translates a reqwest failure into transport markers.
///
/// reqwest reports resolver and TLS failures as connect errors, so those
/// are told apart by the text of the source chain. The target URL is
/// stripped first: its host or path must never decide the fault.
pub(super) fn transport_error(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    let message = chain_message(&err);
    let lowered = message.to_ascii_lowercase();
    let is_dns = DNS_MARKERS.iter().any(|marker| lowered.contains(marker));
    let is_tls = lowered.contains("tls") || lowered.contains("certificate");

    let mut transport = TransportError::new(message);
    if err.is_timeout() {
        transport = transport.with_fault(TransportFault::Timeout);
    }
    if is_dns {
        transport = transport.with_fault(TransportFault::Dns);
    }
    if err.is_connect() && !is_dns && !is_tls {
        transport = transport.with_fault(TransportFault::Dial);
    }
    if err.is_builder() {
        transport = transport.with_fault(TransportFault::InvalidUrl);
    }
    transport
}

fn chain_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
