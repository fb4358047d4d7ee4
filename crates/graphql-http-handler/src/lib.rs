//! Serves a GraphQL engine over HTTP.
//!
//! Requests are accepted in every encoding clients commonly use: URL parameters,
//! `application/graphql`, `application/json` and `application/x-www-form-urlencoded` bodies.
//! Browsers are served GraphiQL or GraphQL Playground instead of a JSON result when enabled.

mod config;
mod error;
mod execution;
pub mod explorer;
mod handler;
pub mod negotiation;
mod request_options;
pub mod response;

#[cfg(feature = "async-graphql")]
mod async_graphql_schema;
#[cfg(feature = "axum")]
pub mod router;

pub use config::HandlerConfig;
pub use error::Error;
pub use execution::{
    execute, ExecutionOutcome, ExecutionRequest, Executor, GraphqlError, Location, RequestContext, RootValue,
    RootValueFactory,
};
pub use handler::{Handler, HandlerBuilder};
pub use negotiation::Explorer;
pub use request_options::{RequestOptions, Variables};
pub use tokio_util::sync::CancellationToken;
