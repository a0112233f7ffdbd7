pub mod render_handle;
pub mod render_summary;
