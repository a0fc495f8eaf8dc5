//! The ledger client capability the gateway depends on.

use collabsplit_types::{Address, ObjectId};
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::LedgerError;
use crate::transaction::TransactionBlock;

/// A transaction to sign as `signer` and execute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub signer: Address,
    pub transaction_block: TransactionBlock,
}

/// Which parts of an object a fetch should include.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    #[serde(default)]
    pub show_type: bool,
    #[serde(default)]
    pub show_owner: bool,
    #[serde(default)]
    pub show_content: bool,
}

impl ObjectDataOptions {
    /// Include the object's Move content.
    pub fn with_content() -> Self {
        Self {
            show_content: true,
            ..Self::default()
        }
    }
}

/// Execution result exactly as the ledger client returned it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionReceipt(pub serde_json::Value);

impl TransactionReceipt {
    /// Transaction digest, when the receipt carries one.
    pub fn digest(&self) -> Option<&str> {
        self.0.get("digest").and_then(|d| d.as_str())
    }

    /// `effects.status.status` ("success" / "failure"), when present.
    pub fn status(&self) -> Option<&str> {
        self.0
            .pointer("/effects/status/status")
            .and_then(|s| s.as_str())
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Object fetch result exactly as the ledger client returned it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectResponse(pub serde_json::Value);

impl ObjectResponse {
    /// The object's Move content (`data.content`), if it was requested and exists.
    pub fn content(&self) -> Option<&serde_json::Value> {
        self.0.pointer("/data/content")
    }

    /// The ledger's error payload for missing or deleted objects.
    pub fn error(&self) -> Option<&serde_json::Value> {
        self.0.get("error")
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Signs, executes and reads on behalf of the gateway.
///
/// Implementations own key custody and transport; the gateway only builds
/// transactions and forwards results and errors unchanged.
pub trait LedgerClient: Send + Sync {
    fn sign_and_execute_transaction_block(
        &self,
        request: ExecuteRequest,
    ) -> impl Future<Output = Result<TransactionReceipt, LedgerError>> + Send;

    fn get_object(
        &self,
        id: ObjectId,
        options: ObjectDataOptions,
    ) -> impl Future<Output = Result<ObjectResponse, LedgerError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn receipt_accessors() {
        let receipt = TransactionReceipt(json!({
            "digest": "9xQ",
            "effects": { "status": { "status": "success" } }
        }));
        assert_eq!(receipt.digest(), Some("9xQ"));
        assert_eq!(receipt.status(), Some("success"));
    }

    #[test]
    fn object_response_content() {
        let resp = ObjectResponse(json!({
            "data": { "objectId": "0x1", "content": { "fields": {} } }
        }));
        assert!(resp.content().is_some());
        assert!(resp.error().is_none());
    }

    #[test]
    fn options_serialize_camel_case() {
        let v = serde_json::to_value(ObjectDataOptions::with_content()).unwrap();
        assert_eq!(
            v,
            json!({ "showType": false, "showOwner": false, "showContent": true })
        );
    }
}
