pub(crate) const DEFAULT_USER_AGENT: &str = concat!("wideload/", env!("CARGO_PKG_VERSION"));

/// Detailed per-request export written after every run.
pub(crate) const DEFAULT_RESULTS_PATH: &str = "detailed-results.csv";

/// Config files picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["wideload.toml", "wideload.json"];
