use crate::controllers::cli::errors::CliError;
use crate::controllers::interactive::data::render_summary::RenderSummary;
use crate::controllers::interactive::scheduler::{RenderScheduler, SchedulerAction};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render_job::render_job::SliceOutcome;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::formula::params::DrawParameters;
use crate::presenters::message::shared_error_message::SharedErrorMessage;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

const PROGRESS_LOG_INTERVAL: usize = 50;

/// Renders one image headlessly through the slice scheduler and hands it
/// to a file presenter.
pub struct RenderController<P: FilePresenterPort> {
    presenter: P,
    slice_budget: Duration,
    errors: SharedErrorMessage,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> RenderController<P> {
    pub fn new(presenter: P, slice_budget: Duration) -> Self {
        Self {
            presenter,
            slice_budget,
            errors: SharedErrorMessage::new(),
            buffer: None,
        }
    }

    pub fn generate(
        &mut self,
        parameters: Arc<DrawParameters>,
        width: u32,
        height: u32,
    ) -> Result<RenderSummary, CliError> {
        self.errors.clear();

        let mut scheduler =
            RenderScheduler::with_slice_budget(Arc::new(self.errors.clone()), self.slice_budget);
        let surface = Rc::new(RefCell::new(PixelBuffer::new(width, height)));
        let completed = Rc::new(Cell::new(None));
        let on_complete = Rc::clone(&completed);

        let handle = scheduler.start_render(
            parameters,
            Rc::clone(&surface),
            Some(Box::new(move |summary: RenderSummary| {
                on_complete.set(Some(summary));
            })),
        );

        let mut slices = 0;
        loop {
            match scheduler.run_slice() {
                SchedulerAction::Sliced {
                    outcome: SliceOutcome::Yielded,
                    ..
                } => {
                    slices += 1;
                    if slices % PROGRESS_LOG_INTERVAL == 0 {
                        log::info!("still rendering after {slices} slices");
                    }
                }
                SchedulerAction::Sliced { .. } | SchedulerAction::Idle => break,
                SchedulerAction::SurfaceBusy { generation } => {
                    return Err(CliError::RenderIncomplete { generation });
                }
            }
        }

        let summary = completed.get().ok_or(CliError::RenderIncomplete {
            generation: handle.generation(),
        })?;

        if let Some(message) = self.errors.current() {
            log::warn!(
                "{} of {} blocks faulted, last: {message}",
                summary.faults,
                summary.blocks
            );
        }

        drop(scheduler);
        self.buffer = Some(
            Rc::try_unwrap(surface)
                .map(RefCell::into_inner)
                .unwrap_or_else(|shared| shared.borrow().clone()),
        );

        Ok(summary)
    }

    /// Message of the last evaluation fault in the most recent render.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.errors.current()
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Writes the rendered image, creating the parent directory if needed.
    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), CliError> {
        let buffer = self.buffer.as_ref().ok_or(CliError::NothingRendered)?;
        let filepath = filepath.as_ref();

        if let Some(parent) = filepath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        self.presenter.present(buffer, filepath)?;

        Ok(())
    }
}
