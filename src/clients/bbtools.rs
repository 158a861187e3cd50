use serde_json::Value;

use super::{ReadsFilter, RpcClient, RqcFilterRequest};
use crate::error::Result;
use crate::filter::{FilterResult, RqcFilterParams};

pub const RUN_RQCFILTER_METHOD: &str = "BBTools.run_RQCFilter_local";

/// BBTools release tag RQCFilter runs are pinned to.
pub const DEFAULT_BBTOOLS_VERSION: &str = "beta";

/// Remote RQCFilter through the BBTools service.
#[derive(Debug, Clone)]
pub struct BbToolsClient {
    rpc: RpcClient,
    service_ver: String,
}

impl BbToolsClient {
    pub fn new(rpc: RpcClient, service_ver: impl Into<String>) -> Self {
        Self {
            rpc,
            service_ver: service_ver.into(),
        }
    }
}

impl ReadsFilter for BbToolsClient {
    fn run_rqcfilter(
        &self,
        request: &RqcFilterRequest,
        params: &RqcFilterParams,
    ) -> Result<FilterResult> {
        let params: Vec<Value> = vec![serde_json::to_value(request)?, serde_json::to_value(params)?];
        self.rpc
            .call(RUN_RQCFILTER_METHOD, params, Some(self.service_ver.as_str()))
    }
}
