// File: src/services/mod.rs

pub mod sync_service;

pub use sync_service::SyncService;
