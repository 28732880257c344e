//! Envelope types exchanged over the bridge channel.
//!
//! Outbound (web → host):
//! `{ "action": "<NAME>", "requestId": "<string>", ...payload fields }`
//!
//! Inbound (host → web):
//! `{ "action": "<NAME>_RESPONSE", "requestId": "<string>",
//!    "result": "SUCCESS"|"FAILED"|"CANCELLED", "data"?: {...},
//!    "error"?: { "message", "code" } }`

use crate::domain::correlation::RequestId;
use crate::domain::error::codes;
use crate::domain::types::{TransactionError, TransactionResult};
use serde::{Deserialize, Serialize};

/// Actions the bridge can request from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "AUTHENTICATE")]
    Authenticate,
    #[serde(rename = "DEPOSIT")]
    Deposit,
    #[serde(rename = "WITHDRAW")]
    Withdraw,
    #[serde(rename = "CALL_SMART_CONTRACT")]
    CallSmartContract,
}

impl Action {
    /// Wire name of the request action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authenticate => "AUTHENTICATE",
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::CallSmartContract => "CALL_SMART_CONTRACT",
        }
    }

    /// Wire name of the matching response action.
    pub fn response_name(self) -> &'static str {
        match self {
            Self::Authenticate => "AUTHENTICATE_RESPONSE",
            Self::Deposit => "DEPOSIT_RESPONSE",
            Self::Withdraw => "WITHDRAW_RESPONSE",
            Self::CallSmartContract => "CALL_SMART_CONTRACT_RESPONSE",
        }
    }

    /// Look up an action by its request wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AUTHENTICATE" => Some(Self::Authenticate),
            "DEPOSIT" => Some(Self::Deposit),
            "WITHDRAW" => Some(Self::Withdraw),
            "CALL_SMART_CONTRACT" => Some(Self::CallSmartContract),
            _ => None,
        }
    }

    /// Look up an action by its response wire name.
    pub fn from_response_name(name: &str) -> Option<Self> {
        name.strip_suffix("_RESPONSE").and_then(Self::from_name)
    }
}

/// Request envelope (web → host).
///
/// Payload fields are flattened into the top-level object, so the wire
/// shape is `{action, requestId, ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub action: Action,
    #[serde(rename = "requestId")]
    pub request_id: RequestId,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl RequestEnvelope {
    /// Build a request envelope with a fresh request id.
    pub fn new(action: Action, payload: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            action,
            request_id: RequestId::new(),
            payload,
        }
    }
}

/// Outcome tag on a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultTag {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

/// Response envelope (host → web).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Response action name (`<ACTION>_RESPONSE`). Kept as received; the
    /// codec has already verified it maps to a known action.
    pub action: String,
    #[serde(rename = "requestId")]
    pub request_id: RequestId,
    pub result: ResultTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TransactionError>,
}

impl ResponseEnvelope {
    /// Create a SUCCESS response (host side; used in tests and simulators).
    pub fn success(action: Action, request_id: RequestId, data: serde_json::Value) -> Self {
        Self {
            action: action.response_name().to_string(),
            request_id,
            result: ResultTag::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Create a FAILED response.
    pub fn failed(
        action: Action,
        request_id: RequestId,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action: action.response_name().to_string(),
            request_id,
            result: ResultTag::Failed,
            data: None,
            error: Some(TransactionError {
                message: message.into(),
                code: code.into(),
            }),
        }
    }

    /// Create a CANCELLED response.
    pub fn cancelled(action: Action, request_id: RequestId) -> Self {
        Self {
            action: action.response_name().to_string(),
            request_id,
            result: ResultTag::Cancelled,
            data: None,
            error: None,
        }
    }

    /// Map the envelope into the outcome delivered to the waiting caller.
    pub fn into_result(self) -> TransactionResult {
        match self.result {
            ResultTag::Success => {
                TransactionResult::Success(self.data.unwrap_or(serde_json::Value::Null))
            }
            ResultTag::Failed => TransactionResult::Failed(self.error.unwrap_or_else(|| {
                TransactionError {
                    message: "host reported failure without detail".into(),
                    code: codes::HOST_FAILED.into(),
                }
            })),
            ResultTag::Cancelled => TransactionResult::Cancelled,
        }
    }
}
