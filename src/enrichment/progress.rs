//! Progress notifications for batch enrichment.
//!
//! Purely observational - a sink never influences control flow.

use std::io::Write;

/// Notified once after every record, with a count that only goes up.
pub trait ProgressSink {
    fn record_completed(&mut self, completed: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize),
{
    fn record_completed(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Discards notifications.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn record_completed(&mut self, _completed: usize, _total: usize) {}
}

/// Rewrites a `[n/total]` counter on stderr, ending the line on the last record.
pub struct ConsoleProgress<W: Write = std::io::Stderr> {
    out: W,
}

impl ConsoleProgress {
    pub fn stderr() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn to_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn record_completed(&mut self, completed: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            completed * 100 / total
        };
        // Progress output is best effort
        let _ = write!(self.out, "\r[{}/{}] {:>3}%", completed, total, percent);
        if completed >= total {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }
}
