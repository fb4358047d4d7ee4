//! Mounts a [`Handler`] in an axum router.

use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http::StatusCode;
use http_body_util::LengthLimitError;
use tokio_util::sync::CancellationToken;

use crate::{Executor, Handler, RequestContext};

pub const DEFAULT_REQUEST_BODY_LIMIT: usize = 4 * 1024 * 1024;

struct ServerState<E> {
    handler: Handler<E>,
    request_body_limit: usize,
}

impl<E> Clone for ServerState<E> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            request_body_limit: self.request_body_limit,
        }
    }
}

/// Serves `handler` on `path` for every HTTP method.
///
/// Bodies are buffered up to `request_body_limit` bytes. Each request gets a cancellation token
/// that fires if the client goes away before the response is ready.
pub fn router<E>(handler: Handler<E>, path: &str, request_body_limit: usize) -> Router
where
    E: Executor,
{
    let state = ServerState {
        handler,
        request_body_limit,
    };

    Router::new().route(path, any(execute::<E>)).with_state(state)
}

async fn execute<E>(State(state): State<ServerState<E>>, request: Request) -> Response
where
    E: Executor,
{
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.request_body_limit).await {
        Ok(body) => body,
        Err(err) if is_length_limit(&err) => {
            tracing::debug!("request body exceeds {} bytes", state.request_body_limit);
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body is too large").into_response();
        }
        Err(err) => {
            tracing::debug!("could not read the request body: {err}");
            return (StatusCode::BAD_REQUEST, "could not read the request body").into_response();
        }
    };

    let context = RequestContext::new(CancellationToken::new());
    let _cancel_on_drop = context.cancellation().clone().drop_guard();

    state
        .handler
        .handle(context, http::Request::from_parts(parts, body))
        .await
        .map(Body::from)
}

fn is_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    std::iter::successors(Some(err), |err| err.source()).any(|err| err.is::<LengthLimitError>())
}
