use crate::core::{Pid, ProcState, Work};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    ProcStateChange {
        pid: Pid,
        from: ProcState,
        to: ProcState,
    },
    Progress {
        pid: Pid,
        work_done: Work,
        pc: Work,
    },
    // Ready queue was empty while unfinished processes remained
    CpuIdle,
}

impl SchedCoreEvent {
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Self::ProcStateChange { pid, .. } | Self::Progress { pid, .. } => Some(*pid),
            Self::CpuIdle => None,
        }
    }
}
