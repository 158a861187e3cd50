use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Switches read from the pipeline's parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Skip RQCFilter and synthesize a pass-through result.
    #[serde(default)]
    pub skip_rqcfilter: bool,

    /// Stored for the surrounding pipeline; the step itself does not act on it.
    #[serde(default)]
    pub debug: bool,
}

/// Everything a [`FilterStep`](super::FilterStep) is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Base URL of the callback server fronting BBTools and DataFileUtil.
    pub callback_url: String,

    /// Pipeline-owned working directory for transient artifacts.
    pub scratch_dir: PathBuf,

    #[serde(default)]
    pub options: FilterOptions,
}

impl FilterConfig {
    pub fn new(
        callback_url: impl Into<String>,
        scratch_dir: impl Into<PathBuf>,
        options: FilterOptions,
    ) -> Self {
        Self {
            callback_url: callback_url.into(),
            scratch_dir: scratch_dir.into(),
            options,
        }
    }
}
