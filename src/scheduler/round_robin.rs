use super::{ENQ_REENQ, EnqueueFlags, KernelCtx, Pid, QueueEmpty, Scheduler};
use log::trace;

/// Single shared FIFO: dispatch strictly in arrival, then requeue, order.
pub struct RoundRobinScheduler;

impl Scheduler for RoundRobinScheduler {
    fn init(_ctx: &mut KernelCtx) -> Self {
        Self
    }

    fn enqueue(&mut self, ctx: &mut KernelCtx, pid: Pid, flags: EnqueueFlags) {
        trace!(
            "t={} enqueue PID {pid}{}",
            ctx.now,
            if flags & ENQ_REENQ != 0 { " (requeue)" } else { "" }
        );
        ctx.ready.enqueue(pid);
    }

    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Result<Pid, QueueEmpty> {
        ctx.ready.dequeue_next()
    }
}
