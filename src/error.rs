use crate::core::Pid;
use std::io;
use thiserror::Error;

/// Rejections raised while ingesting the process list. All of them are
/// fatal: nothing is simulated once one is returned.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid input for number of processes")]
    MalformedCount,

    #[error("Invalid number of processes")]
    InvalidCount(i32),

    #[error("Invalid input format for process data")]
    MalformedEntry { index: u64 },

    #[error("Invalid work units for PID {pid}")]
    InvalidWork { pid: Pid, work: i32 },

    #[error("Duplicate PID {0} detected")]
    DuplicatePid(Pid),

    #[error("Failed to read process list")]
    Io(#[from] io::Error),
}
