pub mod colour_map;
pub mod error_message;
pub mod fractal_algorithm;
pub mod raster_surface;
