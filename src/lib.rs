//! MessageSphere - a demo messaging client backed by mock data and a
//! simulated real-time transport.

pub mod application;
pub mod domain;
pub mod infrastructure;
