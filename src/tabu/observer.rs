//! Progress reporting hook.

/// Snapshot passed to a [`SearchObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Cost of the neighbor accepted in this iteration.
    pub current_cost: f64,
    /// Best cost seen so far, including this iteration.
    pub best_cost: f64,
}

/// Receives periodic progress from the runner.
///
/// Closures taking `&Progress` implement this trait.
pub trait SearchObserver {
    /// Called with the latest progress snapshot.
    fn on_progress(&mut self, progress: &Progress);
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_progress(&mut self, _progress: &Progress) {}
}

impl<F: FnMut(&Progress)> SearchObserver for F {
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}
