/// Fire-and-forget user-facing notification sink (the toast stand-in)
pub trait Notifier: Send + Sync {
    /// Surface a failure notice to the user
    fn error(&self, text: &str);

    /// Surface a success notice to the user
    fn success(&self, text: &str);
}
