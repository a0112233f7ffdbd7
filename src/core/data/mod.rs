pub mod colour;
pub mod pixel_buffer;
pub mod point;
