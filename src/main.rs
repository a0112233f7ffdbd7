use clap::Parser;
use formula_explorer::{CliArgs, DrawParameters, PpmFilePresenter, RenderController};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let parameters = Arc::new(DrawParameters::from_config(&args.draw_config()?)?);

    log::info!(
        "rendering {}x{} in {} mode, max iterations {}",
        args.width,
        args.height,
        parameters.mode(),
        parameters.max_iterations()
    );

    let mut controller = RenderController::new(PpmFilePresenter::new(), args.slice_budget());
    let summary = controller.generate(parameters, args.width, args.height)?;
    log::info!("duration: {:?}", summary.duration);

    controller.write(&args.output)?;
    log::info!("saved to {}", args.output.display());

    Ok(())
}
