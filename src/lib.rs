//! # rqc-step - RQCFilter step for metagenome assembly pipelines
//!
//! Normalizes read filtering into one result shape for the rest of the
//! assembly pipeline:
//!
//! - **Delegate mode**: the reads are filtered remotely by RQCFilter through
//!   the BBTools service, with a fixed, version-pinned parameter set.
//! - **Bypass mode**: filtering is skipped; the reads are gzipped into a
//!   fresh output directory next to an empty log, so downstream stages see
//!   the same three paths either way.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use rqc_step::filter::{FilterConfig, FilterOptions, FilterStep};
//!
//! let config = FilterConfig::new(
//!     "http://localhost:5000",
//!     "/kb/module/work/tmp",
//!     FilterOptions { skip_rqcfilter: true, debug: false },
//! );
//! let step = FilterStep::new(config)?;
//! let result = step.execute("/data/sample.fastq")?;
//! println!("filtered reads at {}", result.filtered_fastq_file.display());
//! # Ok::<(), rqc_step::StepError>(())
//! ```

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod filter;
pub mod utils;

pub use error::{Result, StepError};
pub use filter::{FilterConfig, FilterOptions, FilterResult, FilterStep};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
