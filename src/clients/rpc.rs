//! KBase-style JSON-RPC 1.1 transport
//!
//! Every sibling service behind the pipeline's callback server is called the
//! same way: a POST of `{method, params, version, id, context}` whose answer
//! is either `{result: [value]}` or `{error: {code, message, error}}`.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::{Result, StepError};

const RPC_VERSION: &str = "1.1";

#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    token: Option<String>,
    http: Client,
}

impl RpcClient {
    /// Build a client for `url`. Filtering runs take hours, so no request
    /// timeout is set.
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|source| StepError::Transport {
                method: "client setup".to_string(),
                source,
            })?;

        Ok(Self {
            url: url.into(),
            token: token.filter(|t| !t.is_empty()),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call `method` with positional `params` and decode the first result.
    pub fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
        service_ver: Option<&str>,
    ) -> Result<T> {
        let body = build_request(method, params, service_ver);
        tracing::debug!("POST {} {}", self.url, body);

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token);
        }

        let transport = |source: reqwest::Error| StepError::Transport {
            method: method.to_string(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let text = response.text().map_err(transport)?;
        tracing::debug!("{} answered {}", method, status);

        parse_response(method, status, &text)
    }
}

pub(crate) fn build_request(method: &str, params: Vec<Value>, service_ver: Option<&str>) -> Value {
    json!({
        "method": method,
        "params": params,
        "version": RPC_VERSION,
        "id": Uuid::new_v4().to_string(),
        "context": { "service_ver": service_ver },
    })
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    error: Option<String>,
}

pub(crate) fn parse_response<T: DeserializeOwned>(
    method: &str,
    status: StatusCode,
    body: &str,
) -> Result<T> {
    let envelope: RpcResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => return Err(StepError::malformed(method, e.to_string())),
        Err(_) => {
            return Err(StepError::Remote {
                method: method.to_string(),
                code: i64::from(status.as_u16()),
                message: body.trim().to_string(),
                trace: None,
            });
        }
    };

    if let Some(error) = envelope.error {
        return Err(StepError::Remote {
            method: method.to_string(),
            code: error.code,
            message: error.message,
            trace: error.error,
        });
    }

    let first = envelope
        .result
        .and_then(|values| values.into_iter().next())
        .ok_or_else(|| StepError::malformed(method, "response carries no result"))?;

    serde_json::from_value(first).map_err(|e| StepError::malformed(method, e.to_string()))
}
