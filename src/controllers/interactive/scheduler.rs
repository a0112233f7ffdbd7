use crate::controllers::interactive::data::render_handle::{JobControl, JobState, RenderHandle};
use crate::controllers::interactive::data::render_summary::RenderSummary;
use crate::core::actions::render_job::ports::error_message::ErrorMessagePort;
use crate::core::actions::render_job::ports::raster_surface::RasterSurface;
use crate::core::actions::render_job::render_job::{DEFAULT_SLICE_BUDGET, RenderJob, SliceOutcome};
use crate::core::fractals::formula::algorithm::FormulaAlgorithm;
use crate::core::fractals::formula::colour_map::HueCycleColourMap;
use crate::core::fractals::formula::params::DrawParameters;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A surface shared between the host and the render writing to it.
pub type SharedSurface<S> = Rc<RefCell<S>>;

pub type CompletionCallback = Box<dyn FnOnce(RenderSummary)>;

type FormulaRenderJob = RenderJob<FormulaAlgorithm, HueCycleColourMap>;

struct ActiveRender<S> {
    generation: u64,
    surface: SharedSurface<S>,
    job: FormulaRenderJob,
    control: Arc<JobControl>,
    on_complete: Option<CompletionCallback>,
    started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerAction {
    /// No render is queued.
    Idle,
    Sliced {
        generation: u64,
        outcome: SliceOutcome,
    },
    /// The host holds a borrow of the surface; the render was left queued.
    SurfaceBusy { generation: u64 },
}

/// Runs renders in short slices on the host thread.
///
/// The host calls [`run_slice`](Self::run_slice) whenever it is idle. Each
/// call advances the oldest queued render by one slice and then moves it to
/// the back of the queue, so renders on different surfaces take turns. A
/// render whose surface the host is holding waits without blocking the
/// others. At most one render is active per surface.
pub struct RenderScheduler<S> {
    queue: VecDeque<ActiveRender<S>>,
    generation: u64,
    slice_budget: Duration,
    errors: Arc<dyn ErrorMessagePort>,
}

impl<S: RasterSurface> RenderScheduler<S> {
    #[must_use]
    pub fn new(errors: Arc<dyn ErrorMessagePort>) -> Self {
        Self::with_slice_budget(errors, DEFAULT_SLICE_BUDGET)
    }

    #[must_use]
    pub fn with_slice_budget(errors: Arc<dyn ErrorMessagePort>, slice_budget: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            generation: 0,
            slice_budget,
            errors,
        }
    }

    #[must_use]
    pub fn slice_budget(&self) -> Duration {
        self.slice_budget
    }

    /// Queues a render of `parameters` onto `surface`, cancelling any render
    /// already active on the same surface. Nothing is drawn until the next
    /// slice. `on_complete` runs once if the render finishes and never if it
    /// is cancelled.
    pub fn start_render(
        &mut self,
        parameters: Arc<DrawParameters>,
        surface: SharedSurface<S>,
        on_complete: Option<CompletionCallback>,
    ) -> RenderHandle {
        self.cancel_renders_on(&surface);

        self.generation += 1;
        let generation = self.generation;

        let (width, height) = {
            let surface = surface.borrow();
            (surface.width(), surface.height())
        };

        log::info!(
            "render {generation} started: {width}x{height}, {} mode, block size {}",
            parameters.mode(),
            parameters.pixel_size()
        );

        let colour_map = HueCycleColourMap::new(parameters.color_depth());
        let pixel_size = parameters.pixel_size();
        let algorithm = FormulaAlgorithm::new(parameters, width, height);
        let control = Arc::new(JobControl::new());

        self.queue.push_back(ActiveRender {
            generation,
            surface,
            job: RenderJob::new(algorithm, colour_map, width, height, pixel_size),
            control: Arc::clone(&control),
            on_complete,
            started: Instant::now(),
        });

        RenderHandle::new(generation, control)
    }

    /// Runs one slice of the oldest queued render whose surface is free.
    /// Renders on borrowed surfaces keep their turn order but are passed
    /// over; `SurfaceBusy` is returned only when every queued render is
    /// blocked.
    pub fn run_slice(&mut self) -> SchedulerAction {
        let mut first_busy = None;

        for _ in 0..self.queue.len() {
            let Some(mut active) = self.queue.pop_front() else {
                break;
            };
            let generation = active.generation;

            if active.control.is_cancelled() {
                return Self::drop_cancelled(active);
            }

            let outcome = match active.surface.try_borrow_mut() {
                Ok(mut surface) => Some(active.job.run_slice(
                    &mut *surface,
                    self.slice_budget,
                    active.control.cancel_token(),
                    self.errors.as_ref(),
                )),
                Err(_) => None,
            };

            let Some(outcome) = outcome else {
                log::debug!("render {generation} skipped a slice: surface is borrowed");
                first_busy.get_or_insert(generation);
                self.queue.push_back(active);
                continue;
            };

            let outcome = match outcome {
                SliceOutcome::Yielded => {
                    self.queue.push_back(active);
                    SliceOutcome::Yielded
                }
                SliceOutcome::Completed => Self::complete(active),
                SliceOutcome::Cancelled => return Self::drop_cancelled(active),
            };

            return SchedulerAction::Sliced {
                generation,
                outcome,
            };
        }

        match first_busy {
            Some(generation) => SchedulerAction::SurfaceBusy { generation },
            None => SchedulerAction::Idle,
        }
    }

    /// Runs slices until the queue drains. Stops early once every queued
    /// render is waiting on a borrowed surface. Returns the number of slices
    /// run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut slices = 0;

        loop {
            match self.run_slice() {
                SchedulerAction::Idle => return slices,
                SchedulerAction::SurfaceBusy { generation } => {
                    log::warn!("render {generation} and any others left are blocked by borrowed surfaces");
                    return slices;
                }
                SchedulerAction::Sliced { .. } => slices += 1,
            }
        }
    }

    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.queue
            .iter()
            .any(|active| !active.control.is_cancelled())
    }

    fn cancel_renders_on(&mut self, surface: &SharedSurface<S>) {
        self.queue.retain(|active| {
            if !Rc::ptr_eq(&active.surface, surface) {
                return true;
            }

            if active.control.finish(JobState::Cancelled) {
                log::info!("render {} superseded by a new render", active.generation);
            }

            false
        });
    }

    fn drop_cancelled(active: ActiveRender<S>) -> SchedulerAction {
        active.control.finish(JobState::Cancelled);
        log::info!(
            "render {} cancelled after {} blocks",
            active.generation,
            active.job.stats().blocks
        );

        SchedulerAction::Sliced {
            generation: active.generation,
            outcome: SliceOutcome::Cancelled,
        }
    }

    fn complete(mut active: ActiveRender<S>) -> SliceOutcome {
        if !active.control.finish(JobState::Completed) {
            return SliceOutcome::Cancelled;
        }

        let stats = active.job.stats();
        let summary = RenderSummary {
            generation: active.generation,
            blocks: stats.blocks,
            faults: stats.faults,
            duration: active.started.elapsed(),
        };

        log::info!(
            "render {} completed: {} blocks, {} faults in {:?}",
            summary.generation,
            summary.blocks,
            summary.faults,
            summary.duration
        );

        if let Some(on_complete) = active.on_complete.take() {
            on_complete(summary);
        }

        SliceOutcome::Completed
    }
}
