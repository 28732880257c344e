//! Wire layer: envelope types and the channel codec.

pub mod codec;
pub mod envelope;

pub use codec::{decode_request, decode_response, encode_request, encode_response, DecodeError};
pub use envelope::{Action, RequestEnvelope, ResponseEnvelope, ResultTag};
