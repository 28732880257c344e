//! Envelope codec: serialization to and from the channel's flat text format.
//!
//! The channel is shared with traffic that has nothing to do with the
//! bridge, so decoding separates two failure kinds: [`DecodeError::Foreign`]
//! for data that is simply not a bridge envelope (ignored silently) and
//! [`DecodeError::Malformed`] for data that claims to be one but is broken
//! (logged and dropped). Neither is ever surfaced to a waiting caller.

use crate::wire::envelope::{Action, RequestEnvelope, ResponseEnvelope};

/// Decoding failures.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Valid data that is not an envelope for this bridge.
    #[error("not a bridge envelope")]
    Foreign,
    /// Structurally broken, or a bridge envelope with missing fields.
    #[error("malformed envelope: {0}")]
    Malformed(String),
}

/// Serialize a request envelope to its wire text.
///
/// Fully reversible: `decode_request(encode_request(e)) == e`.
pub fn encode_request(envelope: &RequestEnvelope) -> Result<String, serde_json::Error> {
    serde_json::to_string(envelope)
}

/// Serialize a response envelope to its wire text (host side).
pub fn encode_response(envelope: &ResponseEnvelope) -> Result<String, serde_json::Error> {
    serde_json::to_string(envelope)
}

/// Deserialize a raw inbound message into a request envelope (host side).
pub fn decode_request(raw: &str) -> Result<RequestEnvelope, DecodeError> {
    let value = parse_object(raw)?;
    let action = action_name(&value)?;

    if Action::from_name(action).is_none() {
        return Err(DecodeError::Foreign);
    }

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

/// Deserialize a raw inbound message into a response envelope.
pub fn decode_response(raw: &str) -> Result<ResponseEnvelope, DecodeError> {
    let value = parse_object(raw)?;
    let action = action_name(&value)?;

    if Action::from_response_name(action).is_none() {
        return Err(DecodeError::Foreign);
    }

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn parse_object(raw: &str) -> Result<serde_json::Value, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if !value.is_object() {
        return Err(DecodeError::Foreign);
    }
    Ok(value)
}

fn action_name(value: &serde_json::Value) -> Result<&str, DecodeError> {
    let Some(action) = value.get("action") else {
        return Err(DecodeError::Foreign);
    };
    action
        .as_str()
        .ok_or_else(|| DecodeError::Malformed("action field must be a string".into()))
}
