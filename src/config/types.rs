use serde::Deserialize;

use crate::args::RequestFormat;

/// On-disk run defaults. Every field is optional; command-line flags win
/// over anything set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "requests_file")]
    pub url_file: Option<String>,
    pub format: Option<RequestFormat>,
    pub concurrency: Option<usize>,
    pub run_seconds: Option<u64>,
    pub run_requests: Option<u64>,
    pub fail_after: Option<u64>,
    pub fail_status: Option<u64>,
    pub randomize: Option<bool>,
    pub seed: Option<u64>,
    pub output: Option<String>,
    pub summary_json: Option<String>,
}
