use super::*;

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("5s", Duration::from_secs(5)),
        ("7", Duration::from_secs(7)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3_600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_invalid() -> AppResult<()> {
    for input in ["", "ms", "5d", "0", "0ms"] {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected Err for duration '{}'",
                input
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_overflow() -> AppResult<()> {
    if parse_duration_arg("18446744073709551615h").is_ok() {
        return Err(AppError::validation("Expected overflow error"));
    }
    Ok(())
}

#[test]
fn parse_bool_env_values() -> AppResult<()> {
    for input in ["1", "true", "YES", "on"] {
        if !parse_bool_env(input)? {
            return Err(AppError::validation(format!("Expected true for {}", input)));
        }
    }
    for input in ["0", "false", "No", "off"] {
        if parse_bool_env(input)? {
            return Err(AppError::validation(format!("Expected false for {}", input)));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err(AppError::validation("Expected Err for 'maybe'"));
    }
    Ok(())
}

#[test]
fn positive_wrappers_reject_zero() -> AppResult<()> {
    if "0".parse::<PositiveU64>().is_ok() {
        return Err(AppError::validation("Expected PositiveU64 to reject 0"));
    }
    if "0".parse::<PositiveUsize>().is_ok() {
        return Err(AppError::validation("Expected PositiveUsize to reject 0"));
    }
    let value: PositiveUsize = " 3 ".parse()?;
    if value.get() != 3 {
        return Err(AppError::validation("Unexpected PositiveUsize value"));
    }
    Ok(())
}
