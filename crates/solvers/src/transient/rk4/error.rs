/// Errors that can occur during RK4 integration.
///
/// The error is generic over the model and problem error types so that an
/// infallible model paired with an infallible problem yields an uninhabited
/// error, which callers can discharge with an empty `match`.
#[derive(Debug, thiserror::Error)]
pub enum Error<M, P> {
    #[error("model error: {0}")]
    Model(M),

    #[error("problem error: {0}")]
    Problem(P),
}
