use pendula_core::Snapshot;

/// A snapshot handed to the observer as [`solve`](super::solve) progresses.
///
/// `step` counts accepted RK4 steps: the initial input is step 0 and the
/// snapshot after the `n`th step is step `n`. Intermediate stages are never
/// reported.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,

    /// Model input after the step, with the output evaluated there.
    pub snapshot: Snapshot<I, O>,
}
