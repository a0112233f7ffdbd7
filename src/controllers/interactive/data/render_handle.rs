use crate::core::actions::cancellation::{CancelFlag, CancelToken};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Completed,
    Cancelled,
}

/// State shared between a queued job and the handles given out for it.
#[derive(Debug)]
pub(crate) struct JobControl {
    cancel: CancelFlag,
    state: Mutex<JobState>,
}

impl JobControl {
    pub(crate) fn new() -> Self {
        Self {
            cancel: CancelFlag::new(),
            state: Mutex::new(JobState::Running),
        }
    }

    pub(crate) fn cancel_token(&self) -> &CancelFlag {
        &self.cancel
    }

    pub(crate) fn state(&self) -> JobState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves a running job to `terminal`. Returns false when the job had
    /// already stopped, so each job finishes exactly once.
    pub(crate) fn finish(&self, terminal: JobState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if *state != JobState::Running {
            return false;
        }

        if terminal == JobState::Cancelled {
            self.cancel.cancel();
        }
        *state = terminal;

        true
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Caller-side view of a started render.
///
/// Cheap to clone and safe to send to another thread to cancel from there.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    generation: u64,
    control: Arc<JobControl>,
}

impl RenderHandle {
    pub(crate) fn new(generation: u64, control: Arc<JobControl>) -> Self {
        Self {
            generation,
            control,
        }
    }

    /// Stops the render before its next block. Has no effect once the render
    /// has completed or was already cancelled.
    pub fn cancel(&self) {
        if self.control.finish(JobState::Cancelled) {
            log::debug!("render {} cancelled by handle", self.generation);
        }
    }

    #[must_use]
    pub fn state(&self) -> JobState {
        self.control.state()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_running() {
        let handle = RenderHandle::new(1, Arc::new(JobControl::new()));

        assert_eq!(handle.state(), JobState::Running);
        assert_eq!(handle.generation(), 1);
    }

    #[test]
    fn test_cancel_raises_flag_and_sets_state() {
        let control = Arc::new(JobControl::new());
        let handle = RenderHandle::new(4, Arc::clone(&control));

        handle.cancel();

        assert_eq!(handle.state(), JobState::Cancelled);
        assert!(control.is_cancelled());
    }

    #[test]
    fn test_cancel_after_completion_keeps_completed() {
        let control = Arc::new(JobControl::new());
        let handle = RenderHandle::new(2, Arc::clone(&control));

        assert!(control.finish(JobState::Completed));
        handle.cancel();

        assert_eq!(handle.state(), JobState::Completed);
        assert!(!control.is_cancelled());
    }

    #[test]
    fn test_job_finishes_once() {
        let control = JobControl::new();

        assert!(control.finish(JobState::Cancelled));
        assert!(!control.finish(JobState::Completed));
        assert_eq!(control.state(), JobState::Cancelled);
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<RenderHandle>();
    }
}
