pub mod driver;
pub mod input;
pub mod process;
pub mod trace;

pub use driver::{RunSummary, Sim};
pub use input::{parse_process_list, read_process_list};
pub use process::{ProcessInstance, ProcessSpec};
pub use trace::{COMPLETION_LINE, TraceEmitter};

use crate::scheduler::RoundRobinScheduler;
use std::io::{self, Write};

/// Runs the round-robin simulation to completion, writing every tick's
/// trace and the closing line to `out`.
pub fn simulate<W: Write>(specs: Vec<ProcessSpec>, out: W) -> io::Result<RunSummary> {
    let mut sim = Sim::<RoundRobinScheduler>::new(specs);
    let mut emitter = TraceEmitter::new(out);
    let summary = sim.run(&mut emitter)?;
    emitter.finish()?;
    Ok(summary)
}
