/// Receives the message of the most recent evaluation fault.
pub trait ErrorMessagePort: Send + Sync {
    fn set_error(&self, message: &str);
}
