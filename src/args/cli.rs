use clap::Parser;

use super::defaults::DEFAULT_RESULTS_PATH;
use super::parsers::{parse_fail_status, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize, RequestFormat};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Thread-per-worker HTTP load generator: replays a fixed request set for a request count or a duration and reports latency percentiles."
)]
pub struct TesterArgs {
    /// File of requests to load test (tab-delimited, or YAML for .yaml/.yml/.json)
    #[arg(value_name = "URL_FILE")]
    pub url_file: Option<String>,

    /// Request file layout
    #[arg(long = "format", default_value = "auto", ignore_case = true)]
    pub format: RequestFormat,

    /// Number of concurrent workers [1]
    #[arg(long, short = 'c', default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Length of test in seconds [30 when --run-requests is not set]
    #[arg(
        long = "run-seconds",
        short = 's',
        value_parser = parse_positive_u64,
        conflicts_with = "run_requests"
    )]
    pub run_seconds: Option<PositiveU64>,

    /// Number of requests each worker makes
    #[arg(long = "run-requests", short = 'r', value_parser = parse_positive_u64)]
    pub run_requests: Option<PositiveU64>,

    /// Number of milliseconds after which to consider a request failed
    #[arg(long = "fail-after", short = 'f', value_parser = parse_positive_u64)]
    pub fail_after: Option<PositiveU64>,

    /// HTTP status code at or above which to consider requests failed [400]
    #[arg(long = "fail-status", short = 't', default_value = "400", value_parser = parse_fail_status)]
    pub fail_status: u16,

    /// Start each worker at a random position in the request file
    #[arg(long = "randomize")]
    pub randomize: bool,

    /// Seed for --randomize start positions (random when omitted)
    #[arg(long = "seed", env = "WIDELOAD_SEED")]
    pub seed: Option<u64>,

    /// Path of the detailed per-request CSV export
    #[arg(long = "output", short = 'o', default_value = DEFAULT_RESULTS_PATH)]
    pub output: String,

    /// Also write the aggregate summary as JSON to this path
    #[arg(long = "summary-json")]
    pub summary_json: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by WIDELOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./wideload.toml or ./wideload.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
