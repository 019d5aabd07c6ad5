//! Domain traits - Abstractions for external collaborators

pub mod actor;
pub mod notify;
pub mod scheduler;
pub mod store;

pub use actor::CurrentActor;
pub use notify::Notifier;
pub use scheduler::{Scheduler, TokioScheduler};
pub use store::Store;
