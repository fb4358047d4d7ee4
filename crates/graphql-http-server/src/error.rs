/// Errors of the HTTP server
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// The handler could not be built
    #[error(transparent)]
    Handler(#[from] graphql_http_handler::Error),
    /// Cannot bind the listen address
    #[error("binding {address}: {source}")]
    Bind {
        address: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error
    #[error("serving HTTP: {0}")]
    Server(#[source] std::io::Error),
}
