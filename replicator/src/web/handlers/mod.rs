//! HTTP request handlers for the control API.
//!
//! This module is organized by domain:
//! - `common` - Shared response envelope and error mapping
//! - `health` - Liveness and device identity
//! - `peers` - Discovery and the send action
//! - `status` - Transfer history and datastore counts

pub mod common;
pub mod health;
pub mod peers;
pub mod status;

pub use health::*;
pub use peers::*;
pub use status::*;
