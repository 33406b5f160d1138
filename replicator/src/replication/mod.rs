//! Device-to-device snapshot transfer
//!
//! One exchange is strictly one-directional: the initiating device's
//! `ReplicationClient` connects to the peer's `ReplicationListener`, writes a
//! full snapshot and half-closes. Syncing both ways takes two exchanges.
//!
//! ```text
//! Device A                                   Device B
//! ReplicationClient::send ── TCP :5555 ──→ ReplicationListener
//!   export → encode → write → half-close       read to EOF → decode → import
//! ```

pub mod client;
pub mod listener;
pub mod transport;

pub use client::{ReplicationClient, SendReport};
pub use listener::ReplicationListener;
