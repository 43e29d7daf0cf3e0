pub mod parking_error;
pub mod command_error;
pub mod startup_error;
