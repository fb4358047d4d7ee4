use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use super::script_literal;
use crate::{response, ExecutionRequest};

const PLAYGROUND_VERSION: &str = "1.7.26";

/// Renders GraphQL Playground pointed at the requested path.
pub fn render(request: &ExecutionRequest, uri: &http::Uri) -> http::Response<Bytes> {
    renderer(PlaygroundConfig::default())(request, uri)
}

/// A Playground renderer that always starts from `config`.
///
/// Without an explicit endpoint the page queries the path it was served from.
pub fn renderer(
    config: PlaygroundConfig,
) -> impl Fn(&ExecutionRequest, &http::Uri) -> http::Response<Bytes> + Send + Sync + 'static {
    move |_request: &ExecutionRequest, uri: &http::Uri| {
        let page = if config.endpoint.is_some() {
            playground_source(&config)
        } else {
            playground_source(&PlaygroundConfig {
                endpoint: Some(uri.path().to_owned()),
                ..config.clone()
            })
        };

        response::html(page)
    }
}

/// Generates the page for GraphQL Playground
pub fn playground_source(config: &PlaygroundConfig) -> String {
    include_str!("playground.html")
        .replace("{{PLAYGROUND_VERSION}}", PLAYGROUND_VERSION)
        .replace("{{CONFIG}}", &script_literal(config))
}

/// Config for GraphQL Playground
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<HashMap<String, Value>>,
}

impl PlaygroundConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Default::default()
        }
    }

    /// Set subscription endpoint, for example: `ws://localhost:8080/graphql`.
    #[must_use]
    pub fn subscription_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.subscription_endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP header sent with every query.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set a Playground setting, for example `editor.theme`.
    #[must_use]
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}
