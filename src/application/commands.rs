use std::path::{Path, PathBuf};

use crate::args::RequestFormat;
use crate::domain::RunConfig;

/// Everything a local run needs once arguments and config are resolved.
#[derive(Debug)]
pub(crate) struct LocalRunCommand {
    run_config: RunConfig,
    request_file: PathBuf,
    format: RequestFormat,
    output: PathBuf,
    summary_json: Option<PathBuf>,
}

impl LocalRunCommand {
    #[must_use]
    pub(crate) const fn new(
        run_config: RunConfig,
        request_file: PathBuf,
        format: RequestFormat,
        output: PathBuf,
        summary_json: Option<PathBuf>,
    ) -> Self {
        Self {
            run_config,
            request_file,
            format,
            output,
            summary_json,
        }
    }

    #[must_use]
    pub(crate) const fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    #[must_use]
    pub(crate) fn request_file(&self) -> &Path {
        &self.request_file
    }

    #[must_use]
    pub(crate) const fn format(&self) -> RequestFormat {
        self.format
    }

    #[must_use]
    pub(crate) fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub(crate) fn summary_json(&self) -> Option<&Path> {
        self.summary_json.as_deref()
    }
}
