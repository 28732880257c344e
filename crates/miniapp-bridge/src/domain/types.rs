//! Domain types: action parameters and the tri-state transaction outcome.
//!
//! Payload data is opaque to the bridge beyond presence checks; the typed
//! structs here exist for callers building requests and decoding results.

use serde::{Deserialize, Serialize};

/// Tri-state outcome of a bridge action.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionResult {
    /// Host confirmed the action; carries action-specific result data.
    Success(serde_json::Value),
    /// The action failed, locally or host-side.
    Failed(TransactionError),
    /// The user or the environment cancelled the action.
    Cancelled,
}

impl TransactionResult {
    /// Build a FAILED result from a code and message.
    pub fn failed(code: &str, message: impl Into<String>) -> Self {
        Self::Failed(TransactionError {
            message: message.into(),
            code: code.to_string(),
        })
    }

    /// Whether this is a SUCCESS outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether this is a CANCELLED outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Success data, if present.
    pub fn success_data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Structured error, if this is a FAILED outcome.
    pub fn error(&self) -> Option<&TransactionError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Decode the success data into a typed payload.
    pub fn success_as<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.success_data()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }
}

/// Structured failure: human-readable message plus machine-readable code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionError {
    pub message: String,
    pub code: String,
}

/// Target chain for actions that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainId {
    #[serde(rename = "MAINNET")]
    Mainnet,
    #[serde(rename = "TESTNET")]
    Testnet,
}

/// Contract interface standard for `CALL_SMART_CONTRACT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStandard {
    #[serde(rename = "ERC20")]
    Erc20,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    Erc1155,
}

/// Parameters for `AUTHENTICATE`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateParams {
    /// Optional challenge the host signs; when present it must be at least
    /// 8 alphanumeric characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

/// Parameters for `DEPOSIT`.
///
/// Amount and token are passed through unvalidated; the host is
/// authoritative for both.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositParams {
    pub amount: String,
    pub token_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

/// Parameters for `WITHDRAW`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawParams {
    pub amount: String,
    pub token_name: String,
}

/// Parameters for `CALL_SMART_CONTRACT`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallParams {
    pub contract_address: String,
    pub function_name: String,
    /// Positional arguments, encoded as the host expects them.
    pub function_params: serde_json::Value,
    /// Native value to attach, as a decimal string.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_standard: Option<ContractStandard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

/// SUCCESS data for `AUTHENTICATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub wallet: String,
    pub signature: String,
    pub message: String,
}

/// SUCCESS data for `DEPOSIT`, `WITHDRAW`, and `CALL_SMART_CONTRACT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxData {
    pub tx_hash: String,
}
