//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (User, Contact, Message)
//! - Traits: Abstractions for collaborators (CurrentActor, Notifier, Scheduler, Store)

pub mod entities;
pub mod traits;
