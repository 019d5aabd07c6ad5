//! Domain entities - Core business objects with no external dependencies

pub mod contact;
pub mod message;
pub mod user;

pub use contact::{avatar_url, Contact};
pub use message::Message;
pub use user::User;
