pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use observer::{Observer, TraceSink};
pub use state::{
    KernelCtx, Pid, ProcIdx, ProcState, Process, QueueEmpty, ReadyQueue, Ticks, Work,
    all_terminated,
};
