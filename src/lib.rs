mod controllers;
mod core;
mod presenters;

pub use controllers::cli::{CliArgs, CliError, ModeArg, RenderController};
pub use controllers::interactive::{
    CompletionCallback, JobState, RenderHandle, RenderScheduler, RenderSummary, SchedulerAction,
    SharedSurface,
};
pub use controllers::ports::file_presenter::FilePresenterPort;

pub use crate::core::actions::cancellation::{CancelFlag, CancelToken, NeverCancel};
pub use crate::core::actions::render_job::ports::colour_map::ColourMap;
pub use crate::core::actions::render_job::ports::error_message::ErrorMessagePort;
pub use crate::core::actions::render_job::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::render_job::ports::raster_surface::RasterSurface;
pub use crate::core::actions::render_job::render_job::{
    DEFAULT_SLICE_BUDGET, FAULT_MESSAGE_PREFIX, RenderJob, RenderStats, SliceOutcome,
};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::point::{PlanePoint, Point};
pub use crate::core::expression::functions::Function;
pub use crate::core::expression::{Bindings, EvaluationFault, Expression, ParseError, Value};
pub use crate::core::fractals::formula::algorithm::{
    EscapeOutcome, FormulaAlgorithm, IterationResult, compute_escape_iterations,
};
pub use crate::core::fractals::formula::colour_map::HueCycleColourMap;
pub use crate::core::fractals::formula::errors::ConfigurationFault;
pub use crate::core::fractals::formula::formula_config::DrawConfig;
pub use crate::core::fractals::formula::params::{
    DrawParameters, FormulaRole, IterationFormula, Mode,
};
pub use crate::core::util::pixel_to_plane_coords::pixel_to_plane_coords;
pub use presenters::file::ppm::PpmFilePresenter;
pub use presenters::message::shared_error_message::SharedErrorMessage;
