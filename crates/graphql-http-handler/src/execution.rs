//! The seam between the HTTP handler and the GraphQL engine.

use std::{future::Future, sync::Arc};

use bytes::Bytes;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::request_options::{RequestOptions, Variables};

/// A GraphQL engine able to execute a document against its schema.
///
/// The handler never looks into the outcome, engine errors are expected to be reported
/// inside it.
pub trait Executor: Send + Sync + 'static {
    fn execute(&self, request: ExecutionRequest) -> impl Future<Output = ExecutionOutcome> + Send;
}

/// Builds the root value of an execution from the incoming request.
pub type RootValueFactory = Arc<dyn Fn(&RequestContext, &http::Request<Bytes>) -> RootValue + Send + Sync>;

/// Request scoped state handed to the engine: a cancellation signal and typed values.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    values: http::Extensions,
}

impl RequestContext {
    pub fn new(cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            values: http::Extensions::new(),
        }
    }

    #[must_use]
    pub fn with_value<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.values.insert(value);
        self
    }

    pub fn get<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.values.get::<T>()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

/// The object resolution starts from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootValue(pub Map<String, Value>);

impl RootValue {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for RootValue {
    fn from(value: Map<String, Value>) -> Self {
        RootValue(value)
    }
}

/// Everything the engine needs to run one operation.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub query: String,
    pub variables: Variables,
    pub operation_name: Option<String>,
    pub root_value: Option<RootValue>,
    pub context: RequestContext,
}

impl ExecutionRequest {
    pub fn new(options: RequestOptions, context: RequestContext) -> Self {
        let RequestOptions {
            query,
            variables,
            operation_name,
        } = options;

        Self {
            query,
            variables: variables.unwrap_or_default(),
            operation_name: Some(operation_name).filter(|name| !name.is_empty()),
            root_value: None,
            context,
        }
    }

    /// Builds the engine input, invoking the root value factory if there is one.
    pub fn build(
        options: RequestOptions,
        context: RequestContext,
        root_value_factory: Option<&RootValueFactory>,
        request: &http::Request<Bytes>,
    ) -> Self {
        let root_value = root_value_factory.map(|factory| factory(&context, request));

        Self {
            root_value,
            ..Self::new(options, context)
        }
    }
}

/// Result of an execution, in the GraphQL response format.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionOutcome {
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl ExecutionOutcome {
    pub fn from_error(error: impl Into<GraphqlError>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }
}

impl From<&str> for GraphqlError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for GraphqlError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Runs `request` on `schema` and returns the outcome untouched.
pub async fn execute<E>(schema: &E, request: ExecutionRequest) -> ExecutionOutcome
where
    E: Executor,
{
    tracing::debug!(operation_name = request.operation_name.as_deref(), "executing GraphQL request");

    schema.execute(request).await
}
