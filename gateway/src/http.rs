//! JSON-RPC 2.0 ledger client over HTTP.

use collabsplit_types::ObjectId;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::client::{
    ExecuteRequest, LedgerClient, ObjectDataOptions, ObjectResponse, TransactionReceipt,
};
use crate::config::ClientConfig;
use crate::error::LedgerError;

/// Method the signing endpoint exposes for sign-and-execute.
pub const EXECUTE_METHOD: &str = "signAndExecuteTransactionBlock";

/// Read method for object content.
pub const GET_OBJECT_METHOD: &str = "sui_getObject";

/// HTTP client for a ledger endpoint that holds the signer's keys.
///
/// Wraps `reqwest::Client` with the endpoint URL and a request id counter.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl HttpLedgerClient {
    /// Create a client targeting `rpc_url` with default timeouts.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, LedgerError> {
        let config = ClientConfig {
            rpc_url: rpc_url.into(),
            ..ClientConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a JSON-RPC request and return its `result`.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = envelope(id, method, params);
        tracing::trace!(id, method, "sending ledger request");

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::Http {
                status: response.status().as_u16(),
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(format!("invalid JSON: {e}")))?;

        extract_result(json)
    }
}

impl LedgerClient for HttpLedgerClient {
    async fn sign_and_execute_transaction_block(
        &self,
        request: ExecuteRequest,
    ) -> Result<TransactionReceipt, LedgerError> {
        let params =
            serde_json::to_value(&request).map_err(|e| LedgerError::Encoding(e.to_string()))?;
        self.rpc_call(EXECUTE_METHOD, json!([params]))
            .await
            .map(TransactionReceipt)
    }

    async fn get_object(
        &self,
        id: ObjectId,
        options: ObjectDataOptions,
    ) -> Result<ObjectResponse, LedgerError> {
        let options =
            serde_json::to_value(options).map_err(|e| LedgerError::Encoding(e.to_string()))?;
        self.rpc_call(GET_OBJECT_METHOD, json!([id, options]))
            .await
            .map(ObjectResponse)
    }
}

/// Build a JSON-RPC 2.0 request body.
pub fn envelope(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

/// Pull `result` out of a JSON-RPC response, mapping an `error` object to [`LedgerError::Rpc`].
pub fn extract_result(mut response: Value) -> Result<Value, LedgerError> {
    if let Some(err) = response.get("error").filter(|e| !e.is_null()) {
        let code = err.get("code").and_then(Value::as_i64).unwrap_or_default();
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(LedgerError::Rpc { code, message });
    }

    response
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| LedgerError::InvalidResponse("response has no result".into()))
}
