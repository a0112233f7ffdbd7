pub mod shared_error_message;
