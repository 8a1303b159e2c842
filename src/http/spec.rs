use std::time::Duration;

use crate::args::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REDIRECT_LIMIT, DEFAULT_USER_AGENT, PositiveUsize,
    TesterArgs,
};

/// What every request of a run targets and how its response is judged.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub expected_status: u16,
    /// Substring the body must contain; empty disables the check.
    pub expected_body: String,
    /// Hard deadline for one request, body included.
    pub timeout: Duration,
    pub concurrency: PositiveUsize,
}

impl RequestSpec {
    #[must_use]
    pub fn from_args(args: &TesterArgs) -> Self {
        Self {
            url: args.url.clone(),
            expected_status: args.expected_status_code,
            expected_body: args.expected_body.clone(),
            timeout: args.request_timeout,
            concurrency: args.concurrency,
        }
    }
}

/// Transport knobs that do not change how an outcome is classified.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub redirect_limit: u32,
    pub user_agent: String,
}

impl ClientSettings {
    #[must_use]
    pub fn from_args(args: &TesterArgs) -> Self {
        Self {
            connect_timeout: args.connect_timeout,
            redirect_limit: args.redirect_limit,
            user_agent: args
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}
