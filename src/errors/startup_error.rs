use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid arguments / no arguments passed.")]
    NoArguments,
    #[error("File not found. Please check the path.")]
    FileNotFound(PathBuf),
    #[error("Could not open input: {0}")]
    Io(#[from] io::Error),
}
