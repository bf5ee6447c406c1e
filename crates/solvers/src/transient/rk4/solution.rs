use pendula_core::Snapshot;

/// Why [`solve`](super::solve) returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every requested step was taken.
    Complete,

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// Snapshots recorded by a fixed-step RK4 run.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// One snapshot per accepted step, preceded by the initial snapshot, so
    /// `history.len() == steps + 1`.
    pub history: Vec<Snapshot<I, O>>,

    /// Accepted steps, fewer than requested if an observer stopped the run.
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    /// Returns the final snapshot.
    ///
    /// The history always holds at least the initial snapshot, so this only
    /// returns `None` for a hand-built, empty solution.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }
}
