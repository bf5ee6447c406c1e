/// Receives events from a solver and optionally returns a control action.
///
/// Solvers define their own event and action types. An observer inspects each
/// event as it is emitted and may return `Some(action)` to steer the solver,
/// for example to stop early. Returning `None` lets the solver continue.
///
/// Implemented for:
///
/// - `()` — never acts, used by the `*_unobserved` solver entry points
/// - any `FnMut(&E) -> Option<A>` closure, including `&mut` references to one
pub trait Observer<E, A> {
    /// Observes a single event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
