pub mod round_robin;

use crate::core::{
    Work,
    state::{KernelCtx, Pid, QueueEmpty},
};
pub use round_robin::RoundRobinScheduler;

pub type EnqueueFlags = u64;

// First admission at simulation start
pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
// Put back after the slice expired with work remaining
pub const ENQ_REENQ: EnqueueFlags = 1 << 1;

/// Work units granted per dispatch. Fixed; not configurable.
pub const TIME_QUANTUM: Work = 2;

pub trait Scheduler {
    fn init(ctx: &mut KernelCtx) -> Self;

    fn enqueue(&mut self, ctx: &mut KernelCtx, pid: Pid, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Result<Pid, QueueEmpty>;

    fn slice(&self) -> Work {
        TIME_QUANTUM
    }
}
