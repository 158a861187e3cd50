//! Clients for the services the filter step depends on
//!
//! The step only ever talks to [`ReadsFilter`] and [`FilePacker`]. The remote
//! implementations speak JSON-RPC to the pipeline's callback server, and
//! [`LocalPacker`] gzips on the local machine when no packing service is
//! available.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::filter::{FilterResult, RqcFilterParams};

pub mod bbtools;
pub mod datafileutil;
pub mod local;
pub mod rpc;

pub use bbtools::BbToolsClient;
pub use datafileutil::DataFileUtilClient;
pub use local::LocalPacker;
pub use rpc::RpcClient;

/// Input descriptor for a filtering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RqcFilterRequest {
    pub reads_file: PathBuf,
}

/// Compression formats the packing service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackFormat {
    Gzip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackFileRequest {
    pub file_path: PathBuf,
    pub pack: PackFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackFileResult {
    pub file_path: PathBuf,
}

/// Runs RQCFilter on a reads file somewhere else.
pub trait ReadsFilter: Send + Sync {
    fn run_rqcfilter(
        &self,
        request: &RqcFilterRequest,
        params: &RqcFilterParams,
    ) -> Result<FilterResult>;
}

/// Compresses a file and reports where the compressed copy was written.
pub trait FilePacker: Send + Sync {
    fn pack_file(&self, request: &PackFileRequest) -> Result<PackFileResult>;
}
