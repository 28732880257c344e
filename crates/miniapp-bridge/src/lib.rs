// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! WebView request/response bridge between a web context and a native
//! mobile wallet host.
//!
//! A mini-app page and its host wallet share one serialized message
//! channel. This crate multiplexes typed, correlated, asynchronous
//! actions over that channel: authenticate, deposit, withdraw, and
//! smart-contract calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        MINIAPP BRIDGE                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   gate    ┌──────────────────────────────┐    │
//! │  │ Environment  │◄──────────│        Bridge Client          │    │
//! │  │  Detector    │           │ authenticate/deposit/withdraw │    │
//! │  └──────────────┘           │      /call_smart_contract     │    │
//! │                             └──────────────┬───────────────┘    │
//! │                                            │ register           │
//! │  ┌──────────────────────────────────────────┴───────────────┐   │
//! │  │                  Correlation Table                        │   │
//! │  │        (pending requests resolved via oneshot)            │   │
//! │  └──────────────────────────────────────────┬───────────────┘   │
//! │               resolve ▲                     │                    │
//! │  ┌────────────────────┴───────┐   ┌────────▼────────────────┐   │
//! │  │     Listener Registrar     │   │      Message Codec       │   │
//! │  │  (single inbound handler)  │   │   (envelope encode/      │   │
//! │  └────────────────────▲───────┘   │        decode)           │   │
//! └───────────────────────┼───────────┴────────┬────────────────────┘
//!                         │ inbound            │ outbound
//!                   ┌─────┴────────────────────▼─────┐
//!                   │      WebView message channel    │
//!                   └─────────────┬──────────────────┘
//!                                 │
//!                         Native wallet host
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use miniapp_bridge::{BridgeConfig, DepositParams, MiniAppBridge};
//!
//! let bridge = MiniAppBridge::new(BridgeConfig::default(), signals, channel, source)?;
//! bridge.start();
//!
//! let result = bridge.client().deposit(DepositParams {
//!     amount: "10".into(),
//!     token_name: "USDT".into(),
//!     chain_id: None,
//! }).await?;
//! ```
//!
//! # Guarantees
//!
//! - Every request either resolves with its host response, fails with a
//!   timeout, or is cancelled at teardown; never more than once.
//! - Responses correlate strictly by request id, never by arrival order.
//! - Foreign and malformed inbound traffic is dropped, never fatal.
//! - No operation is retried automatically.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod client;
pub mod detect;
pub mod domain;
pub mod listener;
pub mod ports;
pub mod service;
pub mod wire;

// Re-exports for public API
pub use client::BridgeClient;
pub use detect::{EnvironmentDetector, HostSignals, StaticSignals, HOST_MARKER};
pub use domain::config::{BridgeConfig, ConfigError};
pub use domain::correlation::RequestId;
pub use domain::error::{codes, BridgeError, BridgeResult};
pub use domain::pending::{BridgeStats, PendingTable};
pub use domain::types::{
    AuthData, AuthenticateParams, ChainId, ContractCallParams, ContractStandard, DepositParams,
    TransactionError, TransactionResult, TxData, WithdrawParams,
};
pub use listener::ListenerRegistrar;
pub use ports::{ChannelError, InboundSource, MessageChannel};
pub use service::MiniAppBridge;
pub use wire::{Action, DecodeError, RequestEnvelope, ResponseEnvelope, ResultTag};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
