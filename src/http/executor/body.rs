use futures_util::StreamExt;
use reqwest::Response;

/// Upper bound on how much of a response body is buffered (10 MiB).
pub const MAX_BODY_BYTES: usize = 10_485_760;

pub(super) struct BodyReadError {
    pub(super) source: reqwest::Error,
    pub(super) partial_body: Vec<u8>,
}

/// Reads at most `cap` bytes of the body; the rest is left unread.
pub(super) async fn read_capped_body(
    response: Response,
    cap: usize,
) -> Result<Vec<u8>, BodyReadError> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while body.len() < cap {
        let Some(chunk) = stream.next().await else {
            break;
        };
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(source) => {
                return Err(BodyReadError {
                    source,
                    partial_body: body,
                });
            }
        };
        let take = cap.saturating_sub(body.len()).min(bytes.len());
        if let Some(head) = bytes.get(..take) {
            body.extend_from_slice(head);
        }
    }
    Ok(body)
}
