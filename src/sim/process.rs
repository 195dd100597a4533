use crate::core::state::{Pid, Ticks, Work};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub work: Work,
}

#[derive(Debug, Clone)]
pub struct ProcessInstance {
    pub spec: ProcessSpec,
    pub dispatches: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl ProcessInstance {
    pub fn new(spec: ProcessSpec) -> Self {
        Self {
            spec,
            dispatches: 0,
            first_run: None,
            completion_time: None,
        }
    }
}
