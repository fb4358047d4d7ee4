/// Errors raised while building a [`Handler`](crate::Handler).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No schema was given to the builder
    #[error("undefined GraphQL schema")]
    MissingSchema,
}
