//! HTTP transport for the JSON-RPC core
//!
//! Provides the external API routing: the `/rpc` endpoint and a health probe.

pub mod handlers;
