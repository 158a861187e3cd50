use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Artifacts of one filter step run. Same shape whether RQCFilter ran or
/// was skipped, so later pipeline stages never need to know which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Directory holding every file this run produced.
    pub output_directory: PathBuf,

    /// Gzip-compressed reads, filtered or passed through.
    pub filtered_fastq_file: PathBuf,

    /// RQCFilter's stderr, or an empty file when filtering was skipped.
    pub run_log: PathBuf,
}
