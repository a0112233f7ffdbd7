use crate::core::actions::render_job::ports::error_message::ErrorMessagePort;
use std::sync::{Arc, Mutex, PoisonError};

/// Holds the current error message for the host to display. A new message
/// replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct SharedErrorMessage {
    message: Arc<Mutex<Option<String>>>,
}

impl SharedErrorMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl ErrorMessagePort for SharedErrorMessage {
    fn set_error(&self, message: &str) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }
}
