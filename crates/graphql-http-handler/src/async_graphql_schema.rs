//! Executes requests with an [`async_graphql::Schema`].

use async_graphql::{ObjectType, PathSegment, Schema, ServerError, SubscriptionType};
use serde_json::Value;

use crate::{ExecutionOutcome, ExecutionRequest, Executor, GraphqlError, Location};

/// The root value and the request context are available to resolvers as context data, with
/// `ctx.data::<RootValue>()` and `ctx.data::<RequestContext>()`.
impl<Query, Mutation, Subscription> Executor for Schema<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    async fn execute(&self, request: ExecutionRequest) -> ExecutionOutcome {
        let ExecutionRequest {
            query,
            variables,
            operation_name,
            root_value,
            context,
        } = request;

        let cancellation = context.cancellation().clone();

        let mut graphql_request =
            async_graphql::Request::new(query).variables(async_graphql::Variables::from_json(Value::Object(variables)));

        if let Some(operation_name) = operation_name {
            graphql_request = graphql_request.operation_name(operation_name);
        }

        if let Some(root_value) = root_value {
            graphql_request = graphql_request.data(root_value);
        }

        graphql_request = graphql_request.data(context);

        tokio::select! {
            biased;

            () = cancellation.cancelled() => {
                tracing::debug!("GraphQL request cancelled");
                ExecutionOutcome::from_error("request cancelled")
            }
            response = Schema::execute(self, graphql_request) => ExecutionOutcome::from(response),
        }
    }
}

impl From<async_graphql::Response> for ExecutionOutcome {
    fn from(response: async_graphql::Response) -> Self {
        ExecutionOutcome {
            data: response.data.into_json().unwrap_or_default(),
            errors: response.errors.into_iter().map(GraphqlError::from).collect(),
            extensions: response
                .extensions
                .into_iter()
                .filter_map(|(key, value)| Some((key, value.into_json().ok()?)))
                .collect(),
        }
    }
}

impl From<ServerError> for GraphqlError {
    fn from(error: ServerError) -> Self {
        let extensions = error
            .extensions
            .and_then(|extensions| serde_json::to_value(extensions).ok())
            .and_then(|extensions| match extensions {
                Value::Object(map) if !map.is_empty() => Some(map),
                _ => None,
            });

        GraphqlError {
            message: error.message,
            locations: error
                .locations
                .into_iter()
                .map(|pos| Location {
                    line: pos.line,
                    column: pos.column,
                })
                .collect(),
            path: error
                .path
                .into_iter()
                .map(|segment| match segment {
                    PathSegment::Field(name) => Value::String(name),
                    PathSegment::Index(index) => Value::from(index),
                })
                .collect(),
            extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::{Context, EmptyMutation, EmptySubscription, Object};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{RequestContext, RequestOptions, RootValue};

    #[derive(Clone)]
    struct Greeting(String);

    struct Query;

    #[Object]
    impl Query {
        async fn add(&self, a: i32, b: i32) -> i32 {
            a + b
        }

        async fn greeting(&self, ctx: &Context<'_>) -> Option<String> {
            let context = ctx.data_opt::<RequestContext>()?;
            context.get::<Greeting>().map(|greeting| greeting.0.clone())
        }

        async fn root_name(&self, ctx: &Context<'_>) -> Option<String> {
            let root = ctx.data_opt::<RootValue>()?;
            root.get("name")?.as_str().map(ToOwned::to_owned)
        }
    }

    fn schema() -> Schema<Query, EmptyMutation, EmptySubscription> {
        Schema::new(Query, EmptyMutation, EmptySubscription)
    }

    fn request(query: &str, variables: Value, operation_name: &str) -> ExecutionRequest {
        let options = RequestOptions {
            query: query.to_owned(),
            variables: variables.as_object().cloned(),
            operation_name: operation_name.to_owned(),
        };

        ExecutionRequest::new(options, RequestContext::default())
    }

    #[tokio::test]
    async fn integer_variables_are_coerced() {
        let request = request("query ($a: Int!, $b: Int!) { add(a: $a, b: $b) }", json!({"a": 1, "b": 2}), "");

        let outcome = Executor::execute(&schema(), request).await;

        assert_eq!(outcome, ExecutionOutcome {
            data: json!({"add": 3}),
            ..Default::default()
        });
    }

    #[tokio::test]
    async fn operation_name_selects_the_operation() {
        let request = request(
            "query One { add(a: 1, b: 0) } query Two { add(a: 2, b: 0) }",
            Value::Null,
            "Two",
        );

        let outcome = Executor::execute(&schema(), request).await;

        assert_eq!(outcome.data, json!({"add": 2}));
    }

    #[tokio::test]
    async fn context_and_root_value_reach_resolvers() {
        let mut request = request("{ greeting rootName }", Value::Null, "");
        request.context = RequestContext::default().with_value(Greeting("hello".to_owned()));
        request.root_value = Some(RootValue(json!({"name": "root"}).as_object().cloned().unwrap()));

        let outcome = Executor::execute(&schema(), request).await;

        assert_eq!(outcome.data, json!({"greeting": "hello", "rootName": "root"}));
    }

    #[tokio::test]
    async fn errors_are_reported_in_the_outcome() {
        let request = request("{ nope }", Value::Null, "");

        let outcome = Executor::execute(&schema(), request).await;

        assert_eq!(outcome.data, Value::Null);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.starts_with(r#"Unknown field "nope" on type "Query""#));
        assert_eq!(outcome.errors[0].locations, vec![Location { line: 1, column: 3 }]);
    }

    #[tokio::test]
    async fn cancelled_requests_do_not_execute() {
        let mut request = request("{ add(a: 1, b: 1) }", Value::Null, "");
        request.context.cancellation().cancel();

        let outcome = Executor::execute(&schema(), request).await;

        assert_eq!(outcome, ExecutionOutcome::from_error("request cancelled"));
    }
}
