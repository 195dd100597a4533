use super::process::{ProcessInstance, ProcessSpec};
use crate::{
    core::{
        KernelCtx, SchedCoreEvent, TraceSink,
        driver::SchedCore,
        state::{Pid, ProcState, Process, Ticks},
    },
    scheduler::Scheduler,
};
use average::{Estimate, Mean};
use rustc_hash::FxHashMap;
use std::fmt;
use std::io;

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    pub procs: Vec<ProcessInstance>,
    // Pid --> procs[index] map; used to attribute dispatches and completions
    pid_to_instance: FxHashMap<Pid, usize>,
}

impl<S: Scheduler> Sim<S> {
    /// `specs` must already be validated: positive work, unique pids.
    ///
    /// # Panics
    ///
    /// Panics if `specs` is empty or repeats a pid.
    pub fn new(specs: Vec<ProcessSpec>) -> Self {
        assert!(!specs.is_empty(), "Simulation requires at least one process");
        let table = specs
            .iter()
            .map(|spec| Process::new(spec.pid, spec.work))
            .collect();
        let pid_to_instance = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| (spec.pid, index))
            .collect();

        Self {
            core: SchedCore::<S>::new(table),
            procs: specs.into_iter().map(ProcessInstance::new).collect(),
            pid_to_instance,
        }
    }

    pub fn step<T: TraceSink + ?Sized>(
        &mut self,
        sink: &mut T,
    ) -> io::Result<Vec<SchedCoreEvent>> {
        let events = self.core.tick(sink)?;

        let now = self.core.now();
        for event in &events {
            match *event {
                SchedCoreEvent::Progress { pid, .. } => {
                    let proc = self.instance_mut(pid);
                    proc.dispatches += 1;
                    proc.first_run.get_or_insert(now);
                }
                SchedCoreEvent::ProcStateChange {
                    pid,
                    to: ProcState::Terminated,
                    ..
                } => {
                    self.instance_mut(pid).completion_time = Some(now);
                }
                _ => {}
            }
        }

        Ok(events)
    }

    pub fn run<T: TraceSink + ?Sized>(&mut self, sink: &mut T) -> io::Result<RunSummary> {
        while !self.all_processes_terminated() {
            self.step(sink)?;
        }
        Ok(self.summary())
    }

    pub fn all_processes_terminated(&self) -> bool {
        self.core.all_terminated()
    }

    pub fn ctx(&self) -> &KernelCtx {
        &self.core.ctx
    }

    pub fn procs_map<F>(&self, f: F) -> impl Iterator<Item = f64> + '_
    where
        F: Fn(&ProcessInstance) -> Option<Ticks> + 'static,
    {
        self.procs.iter().filter_map(move |p| f(p)).map(|t| t as f64)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.core.now(),
            processes: self.procs.len(),
            mean_turnaround: avg(self.procs_map(|p| p.completion_time)),
            // Ticks spent waiting before the first dispatch
            mean_response: avg(self.procs_map(|p| p.first_run.map(|t| t - 1))),
        }
    }

    fn instance_mut(&mut self, pid: Pid) -> &mut ProcessInstance {
        let index = *self
            .pid_to_instance
            .get(&pid)
            .expect("Dispatched PID missing from process list");
        &mut self.procs[index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks: Ticks,
    pub processes: usize,
    pub mean_turnaround: f64,
    pub mean_response: f64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processes: {}", self.processes)?;
        writeln!(f, "Total ticks: {}", self.ticks)?;
        writeln!(f, "Average turnaround: {:.2} ticks", self.mean_turnaround)?;
        write!(f, "Average response: {:.2} ticks", self.mean_response)
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
