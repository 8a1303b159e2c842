use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{
    LoadTestPlan, run_load_test, summary_json, summary_lines, write_output_file, write_stdout,
};
use crate::args::TesterArgs;
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, SinkError};
use crate::http::{ClientSettings, HttpExecutor, RequestSpec};
use crate::metrics::RunSummary;

/// Parses arguments, runs the load test and prints the report.
///
/// # Errors
///
/// Returns an error for invalid arguments or config, when the HTTP client
/// cannot be built, or when the report cannot be written. Failed requests
/// are part of the report, not errors.
pub fn run() -> AppResult<()> {
    let matches = TesterArgs::command().get_matches();
    let args = resolve_args(&matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn resolve_args(matches: &ArgMatches) -> AppResult<TesterArgs> {
    let mut args = TesterArgs::from_arg_matches(matches)?;
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}

async fn run_async(args: TesterArgs) -> AppResult<()> {
    let spec = Arc::new(RequestSpec::from_args(&args));
    let executor = Arc::new(HttpExecutor::new(
        &spec,
        &ClientSettings::from_args(&args),
    )?);

    let started_at = Utc::now();
    let summary =
        run_load_test(Arc::clone(&spec), LoadTestPlan::from_args(&args), executor).await?;

    write_stdout(&render_report(&summary, &args, started_at, args.no_color)?).await?;
    if let Some(path) = args.output.as_deref() {
        write_output_file(path, &render_report(&summary, &args, started_at, true)?).await?;
        tracing::info!("Report written to {}", path);
    }
    Ok(())
}

fn render_report(
    summary: &RunSummary,
    args: &TesterArgs,
    started_at: DateTime<Utc>,
    no_color: bool,
) -> AppResult<String> {
    if args.json {
        return serde_json::to_string_pretty(&summary_json(summary, &args.url, started_at))
            .map_err(|err| AppError::sink(SinkError::SerializeJson { source: err }));
    }
    Ok(summary_lines(summary, no_color).join("\n"))
}
