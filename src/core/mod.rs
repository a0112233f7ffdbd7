pub mod actions;
pub mod data;
pub mod expression;
pub mod fractals;
pub mod util;
