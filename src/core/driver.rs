use super::{
    event::SchedCoreEvent,
    observer::{Observer, TraceSink},
    state::{KernelCtx, Process, ProcState, Ticks},
};
use crate::scheduler::{ENQ_ARRIVAL, ENQ_REENQ, Scheduler};
use log::{debug, warn};
use std::io;

pub struct SchedCore<S: Scheduler> {
    pub ctx: KernelCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    /// Builds the process table and admits every process to the ready
    /// queue in the order given.
    ///
    /// # Panics
    ///
    /// Panics if two processes share a pid.
    pub fn new(procs: Vec<Process>) -> Self {
        let mut ctx = KernelCtx::new(procs);
        let mut scheduler = S::init(&mut ctx);
        let arrivals: Vec<_> = ctx.procs.iter().map(|proc| proc.pid).collect();
        for pid in arrivals {
            scheduler.enqueue(&mut ctx, pid, ENQ_ARRIVAL);
        }

        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Runs one dispatch decision. The sink sees the table after the tick's
    /// final state is applied and before a preempted process goes back to
    /// Ready.
    pub fn tick<T: TraceSink + ?Sized>(
        &mut self,
        sink: &mut T,
    ) -> io::Result<Vec<SchedCoreEvent>> {
        self.ctx.advance_time(1);
        let mut events = Vec::new();

        let pid = match self.scheduler.dispatch(&mut self.ctx) {
            Ok(pid) => pid,
            Err(err) => {
                // Unreachable with a single queue and no blocking; keep the
                // trace moving instead of stalling silently.
                warn!(
                    "t={} {err} with unfinished processes; tracing idle tick",
                    self.ctx.now
                );
                events.push(SchedCoreEvent::CpuIdle);
                self.observer.observe(&self.ctx);
                sink.emit(&self.ctx)?;
                return Ok(events);
            }
        };

        let from = self.ctx.set_running(pid);
        events.push(SchedCoreEvent::ProcStateChange {
            pid,
            from,
            to: ProcState::Running,
        });

        let slice = self.scheduler.slice();
        let proc = self.ctx.proc_mut(pid);
        let work_done = proc.advance(slice);
        let pc = proc.pc;
        let completed = proc.is_finished();
        events.push(SchedCoreEvent::Progress { pid, work_done, pc });
        debug!(
            "t={} dispatch PID {pid}: +{work_done} -> pc {pc}",
            self.ctx.now
        );

        if completed {
            self.ctx.mark_terminated(pid);
            events.push(SchedCoreEvent::ProcStateChange {
                pid,
                from: ProcState::Running,
                to: ProcState::Terminated,
            });
            debug!("t={} PID {pid} terminated", self.ctx.now);
        }

        self.observer.observe(&self.ctx);
        sink.emit(&self.ctx)?;

        self.ctx.clear_cpu();
        if !completed {
            self.ctx.mark_ready(pid);
            events.push(SchedCoreEvent::ProcStateChange {
                pid,
                from: ProcState::Running,
                to: ProcState::Ready,
            });
            self.scheduler.enqueue(&mut self.ctx, pid, ENQ_REENQ);
        }

        Ok(events)
    }

    pub fn all_terminated(&self) -> bool {
        self.ctx.all_terminated()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
