use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize, parse_url,
};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP load generator - fixed request count, bounded concurrency, classified failures and latency percentiles.",
    next_help_heading = "Advanced Options"
)]
pub struct TesterArgs {
    /// Target URL for the load test
    #[arg(
        long,
        short,
        default_value = "http://localhost:8080",
        value_parser = parse_url,
        help_heading = "Common Options"
    )]
    pub url: String,

    /// Total number of requests to send
    #[arg(
        long,
        short = 'n',
        default_value = "100",
        value_parser = parse_positive_u64,
        help_heading = "Common Options"
    )]
    pub requests: PositiveU64,

    /// Maximum number of requests in flight at once
    #[arg(
        long,
        short = 'c',
        alias = "workers",
        default_value = "10",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub concurrency: PositiveUsize,

    /// Expected HTTP status code
    #[arg(
        long = "status",
        short = 's',
        default_value_t = 200,
        help_heading = "Common Options"
    )]
    pub expected_status_code: u16,

    /// Text the response body must contain (empty disables the check)
    #[arg(
        long = "body",
        short = 'b',
        default_value = "",
        help_heading = "Common Options"
    )]
    pub expected_body: String,

    /// Hard deadline per request (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "5s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub request_timeout: Duration,

    /// Connect timeout (supports ms/s/m/h, capped at the request timeout)
    #[arg(long = "connect-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Maximum redirects to follow (0 disables following)
    #[arg(long = "redirect", default_value_t = 10)]
    pub redirect_limit: u32,

    /// Override the User-Agent header
    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also write the summary to this file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Log progress every N completed requests
    #[arg(long = "progress-interval", default_value = "10", value_parser = parse_positive_u64)]
    pub progress_interval: PositiveU64,

    /// Path to config file (TOML or JSON). Defaults to ./loadprobe.toml or ./loadprobe.json
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADPROBE_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug", help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
