use crate::core::data::colour::Colour;

/// A drawable raster the render job paints blocks onto.
///
/// Implementations clip blocks that overhang the right or bottom edge.
pub trait RasterSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, width: u32, height: u32, colour: Colour);
}
