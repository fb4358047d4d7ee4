//! Browser explorers served in place of a JSON response.

pub mod graphiql;
pub mod playground;

use std::sync::Arc;

use bytes::Bytes;

use crate::ExecutionRequest;

/// Renders an explorer page for a request to `uri`.
///
/// The execution request is the one the engine would have received, so the page can be
/// pre-populated with the query.
pub type RenderExplorer = Arc<dyn Fn(&ExecutionRequest, &http::Uri) -> http::Response<Bytes> + Send + Sync>;

pub(crate) fn default_graphiql() -> RenderExplorer {
    Arc::new(graphiql::render)
}

pub(crate) fn default_playground() -> RenderExplorer {
    Arc::new(playground::render)
}

/// A JS literal for `value` that is safe inside a `<script>` element and cannot be mistaken for
/// a template placeholder.
fn script_literal<T>(value: &T) -> String
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_string(value)
        .unwrap_or_else(|_| "undefined".to_owned())
        .replace('<', "\\u003c")
        .replace("{{", "{\\u007b")
}
