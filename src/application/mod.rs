//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Transport: the simulated real-time socket
//! - Auth: demo-account authentication
//! - Responder: canned replies for the AI assistant contact
//! - Services: orchestration of socket, storage and responder
//! - Errors: domain-specific errors

pub mod auth;
pub mod errors;
pub mod responder;
pub mod services;
pub mod transport;
