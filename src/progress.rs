//! Progress narration side channel.
//!
//! The engine reports what it is doing through a caller-supplied sink instead
//! of a global logger. The sink has zero effect on which findings are
//! produced or their ordering.

/// Receiver for progress narration emitted during an analysis run.
pub trait ProgressSink {
    /// Receive one line of progress narration.
    fn message(&mut self, text: &str);
}

/// Sink that discards all narration.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn message(&mut self, _text: &str) {}
}

/// Sink that writes narration lines to stderr.
#[derive(Debug, Default)]
pub struct StderrProgress;

impl ProgressSink for StderrProgress {
    fn message(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Adapter that forwards narration to a closure.
pub struct FnSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> ProgressSink for FnSink<F> {
    fn message(&mut self, text: &str) {
        (self.0)(text);
    }
}
