//! Notifications flowing from operations to their single consumer.
//!
//! There is no shared mutable progress state: operations push immutable
//! [`OpEvent`] values through a channel and the owning consumer (the CLI)
//! renders them. Terminal results travel separately, as the return value of
//! the operation future.

use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum OpEvent {
    StepStarted { step: String },
    /// Monotonic liveness tick: one per qualifying output line. A heuristic
    /// "still running" signal, not a percentage of work done.
    Progress { ticks: u64 },
    /// A fatal-classified stderr line, streamed as it is seen. The same
    /// lines are also accumulated in the final report.
    Error { message: String },
    StepFinished { step: String, ok: bool },
}

pub type OpEventTx = mpsc::UnboundedSender<OpEvent>;
pub type OpEventRx = mpsc::UnboundedReceiver<OpEvent>;

pub fn channel() -> (OpEventTx, OpEventRx) {
    mpsc::unbounded_channel()
}

/// Event emitter handed to operations. Wraps an optional channel so headless
/// callers can run without a consumer, and owns the monotonic tick counter.
pub struct OpReporter {
    tx: Option<OpEventTx>,
    ticks: u64,
}

impl OpReporter {
    pub fn new(tx: OpEventTx) -> Self {
        Self { tx: Some(tx), ticks: 0 }
    }

    pub fn disabled() -> Self {
        Self { tx: None, ticks: 0 }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self) {
        self.ticks += 1;
        self.send(OpEvent::Progress { ticks: self.ticks });
    }

    pub fn step_started(&self, step: &str) {
        tracing::info!(step, "step started");
        self.send(OpEvent::StepStarted { step: step.to_string() });
    }

    pub fn step_finished(&self, step: &str, ok: bool) {
        tracing::info!(step, ok, "step finished");
        self.send(OpEvent::StepFinished {
            step: step.to_string(),
            ok,
        });
    }

    pub fn error(&self, message: &str) {
        self.send(OpEvent::Error {
            message: message.to_string(),
        });
    }

    fn send(&self, ev: OpEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_monotonic() {
        let (tx, mut rx) = channel();
        let mut reporter = OpReporter::new(tx);

        for _ in 0..5 {
            reporter.tick();
        }
        drop(reporter);

        let mut last = 0;
        while let Ok(ev) = rx.try_recv() {
            if let OpEvent::Progress { ticks } = ev {
                assert!(ticks > last);
                last = ticks;
            }
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn disabled_reporter_still_counts() {
        let mut reporter = OpReporter::disabled();
        reporter.tick();
        reporter.tick();
        assert_eq!(reporter.ticks(), 2);
    }
}
