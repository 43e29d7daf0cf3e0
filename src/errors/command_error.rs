use thiserror::Error;

/// Why a line could not be turned into a command. Only logged, the user sees a generic message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty line")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{verb}` expects {expected} argument(s), got {got}")]
    WrongArity {
        verb: String,
        expected: usize,
        got: usize,
    },
    #[error("`{verb}` expects a non-negative number, got `{value}`")]
    InvalidNumber {
        verb: String,
        value: String,
    },
}
