//! Headless front end: flag parsing and a controller that renders one image
//! to a file.

pub mod args;
pub mod errors;
pub mod render_controller;

pub use args::{CliArgs, ModeArg};
pub use errors::CliError;
pub use render_controller::RenderController;
