use crate::domain::entities::User;

/// Synchronous query for the authenticated actor, if any.
///
/// The transport treats "none" as a precondition failure; it never blocks
/// waiting for a session to appear.
pub trait CurrentActor: Send + Sync {
    fn current_user(&self) -> Option<User>;
}
