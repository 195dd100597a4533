use crate::core::{KernelCtx, TraceSink};
use std::io::{self, Write};

pub const COMPLETION_LINE: &str = "All processes completed.";

/// Writes one `Interrupt <tick>:` block per tick, processes in ascending
/// pid order.
pub struct TraceEmitter<W: Write> {
    out: W,
}

impl<W: Write> TraceEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out, "{COMPLETION_LINE}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for TraceEmitter<W> {
    fn emit(&mut self, ctx: &KernelCtx) -> io::Result<()> {
        writeln!(self.out, "Interrupt {}:", ctx.now)?;
        for proc in ctx.sorted_by_pid() {
            writeln!(
                self.out,
                "PID {}: {}, at pc {}",
                proc.pid, proc.state, proc.pc
            )?;
        }
        self.out.flush()
    }
}
