use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use bytes::Bytes;
use graphql_http_handler::{
    explorer::playground::PlaygroundConfig,
    Error, ExecutionOutcome, ExecutionRequest, Executor, Handler, HandlerConfig, RequestContext, RootValue,
};
use http::{
    header::{ACCEPT, CONTENT_TYPE},
    Request, Response, StatusCode,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

type StarWarsSchema = Schema<Query, EmptyMutation, EmptySubscription>;

#[derive(SimpleObject)]
struct Character {
    id: String,
    name: String,
}

#[derive(Clone)]
struct Name(&'static str);

struct Query;

#[Object]
impl Query {
    async fn hero(&self) -> Character {
        Character {
            id: "2001".to_owned(),
            name: "R2-D2".to_owned(),
        }
    }

    async fn name(&self, ctx: &Context<'_>) -> Option<String> {
        let context = ctx.data_opt::<RequestContext>()?;
        context.get::<Name>().map(|name| name.0.to_owned())
    }

    async fn root_value(&self, ctx: &Context<'_>) -> Option<String> {
        let root = ctx.data_opt::<RootValue>()?;
        root.get("rootValue")?.as_str().map(ToOwned::to_owned)
    }
}

fn star_wars_schema() -> StarWarsSchema {
    Schema::new(Query, EmptyMutation, EmptySubscription)
}

fn get(uri: &str) -> Request<Bytes> {
    Request::get(uri).body(Bytes::new()).unwrap()
}

fn browser_get(uri: &str, accept: &str) -> Request<Bytes> {
    Request::get(uri).header(ACCEPT, accept).body(Bytes::new()).unwrap()
}

fn decode(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

/// Counts executions and echoes the request back.
#[derive(Default)]
struct RecordingExecutor {
    executions: AtomicUsize,
}

impl Executor for RecordingExecutor {
    async fn execute(&self, request: ExecutionRequest) -> ExecutionOutcome {
        self.executions.fetch_add(1, Ordering::SeqCst);

        ExecutionOutcome {
            data: json!({
                "query": request.query,
                "variables": request.variables,
                "operationName": request.operation_name,
            }),
            ..Default::default()
        }
    }
}

#[tokio::test]
async fn basic_query_pretty() {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .pretty(true)
        .build()
        .unwrap();

    let response = handler
        .serve(get("/graphql?query=query%20HeroNameQuery%20%7B%20hero%20%7B%20name%20%7D%20%7D"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json; charset=utf-8");
    assert_eq!(
        std::str::from_utf8(response.body()).unwrap(),
        "{\n\t\"data\": {\n\t\t\"hero\": {\n\t\t\t\"name\": \"R2-D2\"\n\t\t}\n\t}\n}"
    );
}

#[tokio::test]
async fn basic_query_ugly() {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .pretty(false)
        .build()
        .unwrap();

    let response = handler
        .serve(get("/graphql?query=query%20HeroNameQuery%20%7B%20hero%20%7B%20name%20%7D%20%7D"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), br#"{"data":{"hero":{"name":"R2-D2"}}}"#);
}

#[tokio::test]
async fn post_json_with_string_variables() {
    let handler = Handler::builder()
        .schema(RecordingExecutor::default())
        .build()
        .unwrap();

    let request = Request::post("/graphql")
        .header(CONTENT_TYPE, "application/json")
        .body(Bytes::from_static(
            br#"{"query": "query Q($id: ID) { hero }", "variables": "{\"id\": \"2001\"}", "operationName": "Q"}"#,
        ))
        .unwrap();

    let response = handler.serve(request).await;

    assert_eq!(
        decode(&response),
        json!({
            "data": {
                "query": "query Q($id: ID) { hero }",
                "variables": {"id": "2001"},
                "operationName": "Q"
            }
        })
    );
}

#[tokio::test]
async fn engine_errors_keep_status_ok() {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .pretty(false)
        .build()
        .unwrap();

    let request = Request::post("/graphql")
        .header(CONTENT_TYPE, "application/json")
        .body(Bytes::from_static(b"INVALIDJSON{}"))
        .unwrap();

    let response = handler.serve(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json; charset=utf-8");

    let outcome: ExecutionOutcome = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(outcome.data, Value::Null);
    assert_eq!(outcome.errors.len(), 1);
}

#[tokio::test]
async fn context_is_propagated() {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .build()
        .unwrap();

    let context = RequestContext::default().with_value(Name("context-data"));
    let response = handler.handle(context, get("/graphql?query=%7Bname%7D")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(decode(&response), json!({"data": {"name": "context-data"}}));
}

#[tokio::test]
async fn root_value_factory() {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .root_value_factory(|_context: &RequestContext, _request: &Request<Bytes>| {
            RootValue(json!({"rootValue": "foo"}).as_object().cloned().unwrap_or_default())
        })
        .build()
        .unwrap();

    let response = handler.serve(get("/graphql?query=%7BrootValue%7D")).await;

    assert_eq!(decode(&response), json!({"data": {"rootValue": "foo"}}));
}

#[test]
fn missing_schema_is_an_error() {
    let error = Handler::<StarWarsSchema>::builder().build().err().unwrap();

    assert!(matches!(error, Error::MissingSchema));
    assert_eq!(error.to_string(), "undefined GraphQL schema");
}

#[test]
fn builder_defaults() {
    let handler = Handler::builder()
        .schema(RecordingExecutor::default())
        .build()
        .unwrap();

    assert_eq!(*handler.config(), HandlerConfig::default());
}

#[rstest]
#[case::renders_graphiql(true, Some("text/html"), "/graphql", "text/html; charset=utf-8")]
#[case::turned_off(false, Some("text/html"), "/graphql", "application/json; charset=utf-8")]
#[case::json_accepted(true, Some("application/json,text/html"), "/graphql", "application/json; charset=utf-8")]
#[case::html_not_accepted(true, None, "/graphql", "application/json; charset=utf-8")]
#[case::raw(true, Some("text/html"), "/graphql?raw", "application/json; charset=utf-8")]
#[tokio::test]
async fn render_graphiql(
    #[case] graphiql: bool,
    #[case] accept: Option<&str>,
    #[case] uri: &str,
    #[case] expected_content_type: &str,
) {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .graphiql(graphiql)
        .playground(false)
        .build()
        .unwrap();

    let mut request = get(uri);
    if let Some(accept) = accept {
        request.headers_mut().insert(ACCEPT, accept.parse().unwrap());
    }

    let response = handler.serve(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], expected_content_type);

    if expected_content_type.starts_with("text/html") {
        assert!(std::str::from_utf8(response.body()).unwrap().contains("<!DOCTYPE html>"));
    }
}

#[rstest]
#[case::renders_playground(true, Some("text/html"), "/graphql", "text/html; charset=utf-8")]
#[case::turned_off(false, Some("text/html"), "/graphql", "application/json; charset=utf-8")]
#[case::json_accepted(true, Some("application/json,text/html"), "/graphql", "application/json; charset=utf-8")]
#[case::html_not_accepted(true, None, "/graphql", "application/json; charset=utf-8")]
#[case::raw(true, Some("text/html"), "/graphql?raw", "application/json; charset=utf-8")]
#[tokio::test]
async fn render_playground(
    #[case] playground: bool,
    #[case] accept: Option<&str>,
    #[case] uri: &str,
    #[case] expected_content_type: &str,
) {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .graphiql(false)
        .playground(playground)
        .build()
        .unwrap();

    let mut request = get(uri);
    if let Some(accept) = accept {
        request.headers_mut().insert(ACCEPT, accept.parse().unwrap());
    }

    let response = handler.serve(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], expected_content_type);

    if expected_content_type.starts_with("text/html") {
        let body = std::str::from_utf8(response.body()).unwrap();
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(body.contains("GraphQLPlayground.init"));
    }
}

#[tokio::test]
async fn explorer_skips_execution() {
    let executor = Arc::new(RecordingExecutor::default());
    let handler = Handler::builder()
        .shared_schema(Arc::clone(&executor))
        .graphiql(true)
        .build()
        .unwrap();

    let response = handler
        .serve(browser_get("/graphql?query=%7Bhero%7D", "text/html"))
        .await;

    assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    assert_eq!(executor.executions.load(Ordering::SeqCst), 0);

    let response = handler
        .serve(browser_get("/graphql?query=%7Bhero%7D&raw", "text/html"))
        .await;

    assert_eq!(response.headers()[CONTENT_TYPE], "application/json; charset=utf-8");
    assert_eq!(executor.executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn graphiql_is_preferred_over_playground() {
    let handler = Handler::builder()
        .schema(RecordingExecutor::default())
        .graphiql(true)
        .playground(true)
        .graphiql_renderer(|request: &ExecutionRequest, uri: &http::Uri| {
            Response::new(Bytes::from(format!("graphiql {} {}", uri.path(), request.query)))
        })
        .playground_renderer(|_request: &ExecutionRequest, _uri: &http::Uri| {
            Response::new(Bytes::from_static(b"playground"))
        })
        .build()
        .unwrap();

    let response = handler
        .serve(browser_get("/api/graphql?query=%7Bhero%7D", "text/html"))
        .await;

    assert_eq!(response.body().as_ref(), b"graphiql /api/graphql {hero}");
}

#[tokio::test]
async fn graphiql_is_prefilled_from_the_request() {
    let handler = Handler::builder()
        .schema(star_wars_schema())
        .build()
        .unwrap();

    let response = handler
        .serve(browser_get(
            "/graphql?query=query%20Hero%20%7B%20hero%20%7B%20name%20%7D%20%7D&operationName=Hero",
            "text/html",
        ))
        .await;

    let page = std::str::from_utf8(response.body()).unwrap();
    assert!(page.contains(r#"query: "query Hero { hero { name } }","#));
    assert!(page.contains(r#"operationName: "Hero","#));
}

#[tokio::test]
async fn playground_uses_the_configured_headers() {
    let handler = Handler::builder()
        .schema(RecordingExecutor::default())
        .graphiql(false)
        .playground(true)
        .playground_config(PlaygroundConfig::default().with_header("x-api-key", "secret"))
        .build()
        .unwrap();

    let response = handler.serve(browser_get("/graphql", "text/html")).await;

    let page = std::str::from_utf8(response.body()).unwrap();
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    assert!(page.contains(r#"{"endpoint":"/graphql","headers":{"x-api-key":"secret"}}"#));
}
