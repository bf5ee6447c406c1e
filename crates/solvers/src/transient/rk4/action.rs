/// What an observer can ask of a running [`solve`](super::solve).
///
/// Returning `None` from the observer lets integration continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Halt after the current snapshot. The snapshot is kept in the
    /// returned history.
    StopEarly,
}
