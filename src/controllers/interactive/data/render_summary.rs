use std::time::Duration;

/// Passed to the completion callback of a finished render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub generation: u64,
    pub blocks: u64,
    /// Blocks painted as faulted.
    pub faults: u64,
    /// Wall time from start to completion, including time spent yielded.
    pub duration: Duration,
}
