use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

pub type Pid = i32;
pub type Ticks = u64;
pub type Work = u64;
// Index into the process Vec
pub type ProcIdx = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcState {
    Ready,
    Running,
    Terminated,
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Terminated => "Terminated",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub state: ProcState,
    pub pc: Work,
    pub total_work: Work,
}

impl Process {
    pub fn new(pid: Pid, total_work: Work) -> Self {
        debug_assert!(total_work > 0, "PID {pid} must need some work");
        Self {
            pid,
            state: ProcState::Ready,
            pc: 0,
            total_work,
        }
    }

    /// Moves `pc` forward by at most `units`, never past `total_work`.
    /// Returns the work actually done.
    pub fn advance(&mut self, units: Work) -> Work {
        let done = units.min(self.remaining());
        self.pc += done;
        done
    }

    pub fn set_state(&mut self, state: ProcState) -> ProcState {
        std::mem::replace(&mut self.state, state)
    }

    pub fn remaining(&self) -> Work {
        self.total_work - self.pc
    }

    pub fn is_finished(&self) -> bool {
        self.pc == self.total_work
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("ready queue is empty")]
pub struct QueueEmpty;

/// Strict FIFO of pids awaiting dispatch.
#[derive(Debug, Default, Clone)]
pub struct ReadyQueue {
    pids: VecDeque<Pid>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pids: VecDeque::with_capacity(capacity),
        }
    }

    pub fn enqueue(&mut self, pid: Pid) {
        debug_assert!(
            !self.pids.contains(&pid),
            "PID {pid} already present in the ready queue"
        );
        self.pids.push_back(pid);
    }

    pub fn dequeue_next(&mut self) -> Result<Pid, QueueEmpty> {
        self.pids.pop_front().ok_or(QueueEmpty)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.pids.contains(&pid)
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.pids.iter().copied()
    }
}

#[derive(Debug)]
pub struct KernelCtx {
    pub now: Ticks,
    pub current: Option<Pid>,
    pub procs: Vec<Process>,
    pub ready: ReadyQueue,
    pid_to_idx: FxHashMap<Pid, ProcIdx>,
}

impl KernelCtx {
    /// # Panics
    ///
    /// Panics if two processes share a pid.
    pub fn new(procs: Vec<Process>) -> Self {
        let pid_to_idx: FxHashMap<Pid, ProcIdx> = procs
            .iter()
            .enumerate()
            .map(|(idx, proc)| (proc.pid, idx))
            .collect();
        assert_eq!(
            pid_to_idx.len(),
            procs.len(),
            "Process table requires unique PIDs"
        );

        Self {
            now: 0,
            current: None,
            ready: ReadyQueue::with_capacity(procs.len()),
            procs,
            pid_to_idx,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn proc(&self, pid: Pid) -> &Process {
        &self.procs[self.pid_to_idx[&pid]]
    }

    pub fn proc_mut(&mut self, pid: Pid) -> &mut Process {
        let idx = self.pid_to_idx[&pid];
        &mut self.procs[idx]
    }

    // Return previous state (always Ready for a queued process)
    pub fn set_running(&mut self, pid: Pid) -> ProcState {
        debug_assert!(
            !self.ready.contains(pid),
            "Running PID {pid} must not be enqueued"
        );
        debug_assert!(
            self.current.is_none(),
            "CPU already running PID {:?}",
            self.current
        );

        self.current = Some(pid);
        let proc = self.proc_mut(pid);
        debug_assert_ne!(
            proc.state,
            ProcState::Terminated,
            "Terminated PID {pid} cannot be dispatched"
        );
        proc.set_state(ProcState::Running)
    }

    pub fn mark_terminated(&mut self, pid: Pid) {
        let proc = self.proc_mut(pid);
        debug_assert!(proc.is_finished(), "PID {pid} terminated with work left");
        debug_assert_eq!(
            proc.state,
            ProcState::Running,
            "PID {pid} must have been running before termination"
        );
        proc.set_state(ProcState::Terminated);
    }

    pub fn mark_ready(&mut self, pid: Pid) {
        let proc = self.proc_mut(pid);
        debug_assert!(
            !proc.is_finished(),
            "Finished PID {} cannot be made ready",
            proc.pid
        );
        proc.set_state(ProcState::Ready);
    }

    pub fn clear_cpu(&mut self) {
        self.current = None;
    }

    pub fn all_terminated(&self) -> bool {
        all_terminated(&self.procs)
    }

    /// Display order: ascending pid, independent of dispatch order.
    pub fn sorted_by_pid(&self) -> Vec<&Process> {
        let mut sorted: Vec<&Process> = self.procs.iter().collect();
        sorted.sort_by_key(|proc| proc.pid);
        sorted
    }
}

pub fn all_terminated(procs: &[Process]) -> bool {
    procs
        .iter()
        .all(|proc| proc.state == ProcState::Terminated)
}
