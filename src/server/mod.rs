pub mod command;
pub mod dispatcher;
pub mod render;
