use super::{FilePacker, PackFileRequest, PackFileResult, RpcClient};
use crate::error::Result;

pub const PACK_FILE_METHOD: &str = "DataFileUtil.pack_file";

pub const DEFAULT_DATAFILEUTIL_VERSION: &str = "release";

/// Remote packing through the DataFileUtil service.
///
/// The packed file is written wherever the service decides, usually next to
/// the input inside the shared scratch area.
#[derive(Debug, Clone)]
pub struct DataFileUtilClient {
    rpc: RpcClient,
    service_ver: String,
}

impl DataFileUtilClient {
    pub fn new(rpc: RpcClient, service_ver: impl Into<String>) -> Self {
        Self {
            rpc,
            service_ver: service_ver.into(),
        }
    }
}

impl FilePacker for DataFileUtilClient {
    fn pack_file(&self, request: &PackFileRequest) -> Result<PackFileResult> {
        let params = vec![serde_json::to_value(request)?];
        self.rpc
            .call(PACK_FILE_METHOD, params, Some(self.service_ver.as_str()))
    }
}
