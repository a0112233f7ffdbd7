use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::render_job::ports::colour_map::ColourMap;
use crate::core::actions::render_job::ports::error_message::ErrorMessagePort;
use crate::core::actions::render_job::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render_job::ports::raster_surface::RasterSurface;
use crate::core::data::point::Point;
use std::time::{Duration, Instant};

/// How long a slice may run before yielding to the host.
pub const DEFAULT_SLICE_BUDGET: Duration = Duration::from_millis(33);

pub const FAULT_MESSAGE_PREFIX: &str = "Error in computation: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Budget spent with blocks left; call again to resume.
    Yielded,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub blocks: u64,
    pub faults: u64,
}

/// A resumable row-major sweep over a raster in `pixel_size` blocks.
///
/// Each block is coloured from the algorithm result at its top-left pixel.
/// The job owns no surface; the caller lends one for each slice.
#[derive(Debug)]
pub struct RenderJob<A, C> {
    algorithm: A,
    colour_map: C,
    width: u32,
    height: u32,
    pixel_size: u32,
    cursor: Point,
    stats: RenderStats,
}

impl<A, C> RenderJob<A, C>
where
    A: FractalAlgorithm,
    C: ColourMap<Result<A::Success, A::Failure>>,
{
    /// A `pixel_size` of zero is treated as one.
    #[must_use]
    pub fn new(algorithm: A, colour_map: C, width: u32, height: u32, pixel_size: u32) -> Self {
        Self {
            algorithm,
            colour_map,
            width,
            height,
            pixel_size: pixel_size.max(1),
            cursor: Point { x: 0, y: 0 },
            stats: RenderStats::default(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.width == 0 || self.cursor.y >= self.height
    }

    /// Top-left pixel of the next block to draw.
    #[must_use]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Draws blocks until the raster is covered, `budget` is spent or `cancel`
    /// fires. At least one block is drawn per call unless cancelled first.
    pub fn run_slice<S, T, E>(
        &mut self,
        surface: &mut S,
        budget: Duration,
        cancel: &T,
        errors: &E,
    ) -> SliceOutcome
    where
        S: RasterSurface + ?Sized,
        T: CancelToken + ?Sized,
        E: ErrorMessagePort + ?Sized,
    {
        let started = Instant::now();

        loop {
            if cancel.is_cancelled() {
                return SliceOutcome::Cancelled;
            }

            if self.is_finished() {
                return SliceOutcome::Completed;
            }

            self.draw_block(surface, errors);
            self.advance();

            if self.is_finished() {
                return SliceOutcome::Completed;
            }

            if started.elapsed() >= budget {
                return SliceOutcome::Yielded;
            }
        }
    }

    fn draw_block<S, E>(&mut self, surface: &mut S, errors: &E)
    where
        S: RasterSurface + ?Sized,
        E: ErrorMessagePort + ?Sized,
    {
        let pixel = self.cursor;
        let outcome = self.algorithm.compute(pixel);

        if let Err(fault) = &outcome {
            self.stats.faults += 1;
            log::debug!("fault at x:{}, y:{}: {fault}", pixel.x, pixel.y);
            errors.set_error(&format!("{FAULT_MESSAGE_PREFIX}{fault}"));
        }

        let colour = self.colour_map.map(&outcome);
        surface.set_pixel(pixel.x, pixel.y, self.pixel_size, self.pixel_size, colour);
        self.stats.blocks += 1;
    }

    fn advance(&mut self) {
        let next_x = self.cursor.x.saturating_add(self.pixel_size);

        self.cursor = if next_x < self.width {
            Point {
                x: next_x,
                y: self.cursor.y,
            }
        } else {
            Point {
                x: 0,
                y: self.cursor.y.saturating_add(self.pixel_size),
            }
        };
    }
}
