pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::InputError;
pub use scheduler::{RoundRobinScheduler, Scheduler, TIME_QUANTUM};
pub use sim::{ProcessSpec, RunSummary, Sim, simulate};
