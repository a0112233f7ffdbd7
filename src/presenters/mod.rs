pub mod file;
pub mod message;
