use super::stub_server::{
    LARGE_BODY_HEAD, LARGE_BODY_TAIL, SLOW_DELAY, closed_port_url, spawn_http_server,
};
use super::*;

async fn execute_once(spec: RequestSpec, settings: &ClientSettings) -> AppResult<Outcome> {
    let executor = HttpExecutor::new(&spec, settings)?;
    Ok(executor.execute(&spec).await)
}

fn expect_outcome(outcome: &Outcome, kind: ErrorKind, status: u16) -> AppResult<()> {
    if outcome.error_kind != kind || outcome.status_code != status {
        return Err(AppError::validation(format!(
            "Expected {} / {}, got {} / {} ({})",
            kind, status, outcome.error_kind, outcome.status_code, outcome.error_message
        )));
    }
    Ok(())
}

#[test]
fn successful_request_with_body_check() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let mut spec = request_spec(&format!("{}/ok", base), Duration::from_secs(5))?;
        spec.expected_body = "Hello, World!".to_owned();

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::None, 200)?;
        if outcome.response_bytes != 13 {
            return Err(AppError::validation(format!(
                "Unexpected response_bytes: {}",
                outcome.response_bytes
            )));
        }
        if !outcome.error_message.is_empty() {
            return Err(AppError::validation("Expected empty error message"));
        }
        Ok(())
    })
}

#[test]
fn slow_response_times_out() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let timeout = Duration::from_secs(1);
        let spec = request_spec(&format!("{}/slow", base), timeout)?;

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::Timeout, 0)?;
        if outcome.elapsed < timeout || outcome.elapsed >= SLOW_DELAY {
            return Err(AppError::validation(format!(
                "Unexpected elapsed: {:?}",
                outcome.elapsed
            )));
        }
        Ok(())
    })
}

#[test]
fn server_error_keeps_status() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let spec = request_spec(&format!("{}/fail", base), Duration::from_secs(5))?;

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::ServerError, 500)
    })
}

#[test]
fn missing_route_is_client_error() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let spec = request_spec(&format!("{}/missing", base), Duration::from_secs(5))?;

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::ClientError, 404)
    })
}

#[test]
fn body_mismatch_is_reported() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let mut spec = request_spec(&format!("{}/unexpected", base), Duration::from_secs(5))?;
        spec.expected_body = "Expected body".to_owned();

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::BodyValidation, 200)
    })
}

#[test]
fn redirects_surface_when_following_is_disabled() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let spec = request_spec(&format!("{}/moved", base), Duration::from_secs(5))?;
        let settings = ClientSettings {
            redirect_limit: 0,
            ..ClientSettings::default()
        };

        let outcome = execute_once(spec.clone(), &settings).await?;
        expect_outcome(&outcome, ErrorKind::Redirect, 302)?;

        let followed = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&followed, ErrorKind::None, 200)
    })
}

#[test]
fn malformed_url_is_url_error() -> AppResult<()> {
    run_async_test(async {
        let spec = request_spec("not a url", Duration::from_secs(1))?;

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::Url, 0)?;
        if !outcome.error_message.starts_with("Invalid URL: ") {
            return Err(AppError::validation(format!(
                "Unexpected message: {}",
                outcome.error_message
            )));
        }
        Ok(())
    })
}

#[test]
fn refused_connection_is_connection_error() -> AppResult<()> {
    run_async_test(async {
        let url = closed_port_url().map_err(AppError::validation)?;
        let spec = request_spec(&url, Duration::from_secs(5))?;

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::Connection, 0)
    })
}

#[test]
fn refused_connection_ignores_words_in_the_url() -> AppResult<()> {
    run_async_test(async {
        let base = closed_port_url().map_err(AppError::validation)?;
        let url = format!("{}tls-certificate-status", base);
        let spec = request_spec(&url, Duration::from_secs(5))?;

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::Connection, 0)?;
        if outcome.error_message.contains("tls-certificate-status") {
            return Err(AppError::validation(format!(
                "URL leaked into the message: {}",
                outcome.error_message
            )));
        }
        Ok(())
    })
}

#[test]
fn oversized_body_is_capped_without_failing() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let mut spec = request_spec(&format!("{}/large", base), Duration::from_secs(30))?;
        spec.expected_body = LARGE_BODY_HEAD.to_owned();

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::None, 200)?;
        if outcome.response_bytes != u64::try_from(MAX_BODY_BYTES).unwrap_or(u64::MAX) {
            return Err(AppError::validation(format!(
                "Expected the body cap, got {} bytes",
                outcome.response_bytes
            )));
        }
        Ok(())
    })
}

#[test]
fn body_check_only_sees_the_retained_prefix() -> AppResult<()> {
    run_async_test(async {
        let (base, _server) = spawn_http_server().map_err(AppError::validation)?;
        let mut spec = request_spec(&format!("{}/large", base), Duration::from_secs(30))?;
        spec.expected_body = LARGE_BODY_TAIL.to_owned();

        let outcome = execute_once(spec, &ClientSettings::default()).await?;
        expect_outcome(&outcome, ErrorKind::BodyValidation, 200)?;
        if outcome.response_bytes != u64::try_from(MAX_BODY_BYTES).unwrap_or(u64::MAX) {
            return Err(AppError::validation(format!(
                "Expected the body cap, got {} bytes",
                outcome.response_bytes
            )));
        }
        Ok(())
    })
}
