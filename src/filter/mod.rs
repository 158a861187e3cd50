//! The RQCFilter pipeline step
//!
//! [`FilterStep::execute`] either hands the reads to RQCFilter through the
//! BBTools service, or, with `skip_rqcfilter` set, fakes the same result by
//! gzipping the reads into a fresh output directory next to an empty log.

use std::fs::{self, File};
use std::path::Path;

use crate::clients::{
    BbToolsClient, DataFileUtilClient, FilePacker, PackFileRequest, PackFormat, ReadsFilter,
    RpcClient, RqcFilterRequest, bbtools::DEFAULT_BBTOOLS_VERSION,
    datafileutil::DEFAULT_DATAFILEUTIL_VERSION,
};
use crate::error::{Result, StepError};
use crate::utils;

mod config;
mod params;
mod result;


pub use config::{FilterConfig, FilterOptions};
pub use params::RqcFilterParams;
pub use result::FilterResult;

/// Prefix of the output directory created when filtering is skipped.
pub const DUMMY_OUTPUT_PREFIX: &str = "dummy_rqcfilter_output";

/// Name of the empty log written when filtering is skipped.
pub const DUMMY_LOG_NAME: &str = "dummy_rqcfilter_log.txt";

pub struct FilterStep {
    config: FilterConfig,
    filter: Box<dyn ReadsFilter>,
    packer: Box<dyn FilePacker>,
}

impl FilterStep {
    /// Step backed by the BBTools and DataFileUtil services at
    /// `config.callback_url`, unauthenticated and at their default versions.
    pub fn new(config: FilterConfig) -> Result<Self> {
        let rpc = RpcClient::new(config.callback_url.clone(), None)?;
        let filter = BbToolsClient::new(rpc.clone(), DEFAULT_BBTOOLS_VERSION);
        let packer = DataFileUtilClient::new(rpc, DEFAULT_DATAFILEUTIL_VERSION);
        Ok(Self::with_clients(config, filter, packer))
    }

    /// Step backed by caller-supplied clients.
    pub fn with_clients(
        config: FilterConfig,
        filter: impl ReadsFilter + 'static,
        packer: impl FilePacker + 'static,
    ) -> Self {
        Self {
            config,
            filter: Box::new(filter),
            packer: Box::new(packer),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn is_skipping(&self) -> bool {
        self.config.options.skip_rqcfilter
    }

    pub fn is_debug(&self) -> bool {
        self.config.options.debug
    }

    /// Filter `reads_file`, or pass it through compressed when skipping.
    ///
    /// Remote and filesystem errors are returned as they occurred; nothing
    /// is retried and partially written output is left for the caller.
    pub fn execute<P: AsRef<Path>>(&self, reads_file: P) -> Result<FilterResult> {
        let reads_file = reads_file.as_ref();
        if self.is_skipping() {
            return self.run_skip(reads_file);
        }
        self.run_filter(reads_file)
    }

    fn run_filter(&self, reads_file: &Path) -> Result<FilterResult> {
        tracing::info!("Running RQCFilter remotely using the BBTools service...");
        let request = RqcFilterRequest {
            reads_file: reads_file.to_path_buf(),
        };
        let result = self
            .filter
            .run_rqcfilter(&request, &RqcFilterParams::default())?;
        tracing::info!("Done running RQCFilter");
        Ok(result)
    }

    fn run_skip(&self, reads_file: &Path) -> Result<FilterResult> {
        tracing::info!("NOT running RQCFilter, just dummying up some results");

        utils::mkdir(&self.config.scratch_dir)?;
        let output_directory = self
            .config
            .scratch_dir
            .join(utils::unique_name(DUMMY_OUTPUT_PREFIX));
        // create_dir, not mkdir: the directory must be new to this run
        fs::create_dir(&output_directory)?;

        let run_log = output_directory.join(DUMMY_LOG_NAME);
        File::create(&run_log)?;

        let packed = self.packer.pack_file(&PackFileRequest {
            file_path: reads_file.to_path_buf(),
            pack: PackFormat::Gzip,
        })?;
        let file_name = packed.file_path.file_name().ok_or_else(|| {
            StepError::malformed(
                "pack_file",
                format!("packed path {} has no file name", packed.file_path.display()),
            )
        })?;

        let filtered_fastq_file = output_directory.join(file_name);
        fs::rename(&packed.file_path, &filtered_fastq_file)?;
        tracing::debug!("Pass-through reads at {}", filtered_fastq_file.display());

        Ok(FilterResult {
            output_directory,
            filtered_fastq_file,
            run_log,
        })
    }
}
