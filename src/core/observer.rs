use super::state::{KernelCtx, ProcState};
use std::io;

/// Receives the process table once per tick, after the tick's final states
/// are applied and before a preempted process is requeued.
pub trait TraceSink {
    fn emit(&mut self, ctx: &KernelCtx) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &KernelCtx) {
        self.step += 1;

        let mut running = 0;
        for proc in &ctx.procs {
            debug_assert!(
                proc.pc <= proc.total_work,
                "PID {} overran its work: pc {} > {}",
                proc.pid,
                proc.pc,
                proc.total_work
            );
            debug_assert_eq!(
                proc.state == ProcState::Terminated,
                proc.is_finished(),
                "PID {} state {} disagrees with pc {}/{}",
                proc.pid,
                proc.state,
                proc.pc,
                proc.total_work
            );

            if proc.state == ProcState::Running {
                running += 1;
                debug_assert_eq!(
                    ctx.current,
                    Some(proc.pid),
                    "Running PID {} is not the current process",
                    proc.pid
                );
            }
        }
        debug_assert!(running <= 1, "{running} processes running on one CPU");

        for pid in ctx.ready.iter() {
            let state = ctx.proc(pid).state;
            debug_assert_eq!(
                state,
                ProcState::Ready,
                "PID {pid} in ready queue while {state}"
            );
        }
    }
}
