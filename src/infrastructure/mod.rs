//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: JSON file persistence (the localStorage stand-in)
//! - Adapters: console notification sink and dev loop helpers
//! - Data: mock roster and seeded conversations

pub mod adapters;
pub mod config;
pub mod data;
pub mod storage;
