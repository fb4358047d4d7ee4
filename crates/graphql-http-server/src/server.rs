use std::net::SocketAddr;

use graphql_http_handler::{router, Executor, Handler};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, error::Error};

/// Serves `schema` until ctrl-c.
pub(crate) async fn serve<E>(listen_address: SocketAddr, config: Config, schema: E) -> Result<(), Error>
where
    E: Executor,
{
    let handler = Handler::builder().schema(schema).config(config.handler).build()?;

    let app = router::router(handler, &config.graph.path, config.request_body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(listen_address)
        .await
        .map_err(|source| Error::Bind {
            address: listen_address,
            source,
        })?;

    tracing::info!("GraphQL endpoint exposed at http://{listen_address}{}", config.graph.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Server)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => tracing::error!("could not listen for the shutdown signal: {err}"),
    }
}
