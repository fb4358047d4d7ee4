use bytes::Bytes;

use super::script_literal;
use crate::{response, ExecutionRequest};

const GRAPHIQL_VERSION: &str = "3.7.1";

/// Renders GraphiQL pointed at the requested path, with the editors filled from `request`.
pub fn render(request: &ExecutionRequest, uri: &http::Uri) -> http::Response<Bytes> {
    let variables = if request.variables.is_empty() {
        None
    } else {
        serde_json::to_string_pretty(&request.variables).ok()
    };

    let config = GraphiQLConfig {
        endpoint: uri.path(),
        query: Some(request.query.as_str()).filter(|query| !query.is_empty()),
        variables: variables.as_deref(),
        operation_name: request.operation_name.as_deref(),
    };

    response::html(graphiql_source(&config))
}

/// Generates the GraphiQL page.
pub fn graphiql_source(config: &GraphiQLConfig<'_>) -> String {
    include_str!("graphiql.html")
        .replace("{{GRAPHIQL_VERSION}}", GRAPHIQL_VERSION)
        .replace("{{ENDPOINT}}", &script_literal(config.endpoint))
        .replace("{{QUERY}}", &optional_literal(config.query))
        .replace("{{VARIABLES}}", &optional_literal(config.variables))
        .replace("{{OPERATION_NAME}}", &optional_literal(config.operation_name))
}

/// What the GraphiQL page starts with.
#[derive(Debug, Clone, Copy)]
pub struct GraphiQLConfig<'a> {
    pub endpoint: &'a str,
    pub query: Option<&'a str>,
    pub variables: Option<&'a str>,
    pub operation_name: Option<&'a str>,
}

impl<'a> GraphiQLConfig<'a> {
    pub fn new(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            query: None,
            variables: None,
            operation_name: None,
        }
    }
}

fn optional_literal(value: Option<&str>) -> String {
    value.map_or_else(|| "undefined".to_owned(), script_literal)
}
