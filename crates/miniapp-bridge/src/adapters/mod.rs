//! Adapters implementing the outbound ports.

pub mod channel;

pub use channel::{in_memory_pair, ChannelSender, ChannelSource};
