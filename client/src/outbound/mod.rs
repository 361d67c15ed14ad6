//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest-backed implementation of the `ApiClient` port.
//!
//! Adapters translate between domain requests and transport details only;
//! they contain no record-specific logic.

pub mod http;
