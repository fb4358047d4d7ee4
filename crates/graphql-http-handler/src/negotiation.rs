use std::fmt;

use http::{header::ACCEPT, Request};

use crate::{config::HandlerConfig, request_options::Params};

const CONTENT_TYPE_HTML: &str = "text/html";
const CONTENT_TYPE_JSON: &str = "application/json";

/// Presence of this URL parameter forces a JSON response.
pub const RAW_PARAMETER: &str = "raw";

/// An interactive, browser based GraphQL explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explorer {
    GraphiQL,
    Playground,
}

impl Explorer {
    /// Explorers in the order they are negotiated.
    pub const ALL: [Explorer; 2] = [Explorer::GraphiQL, Explorer::Playground];

    pub fn as_str(self) -> &'static str {
        match self {
            Explorer::GraphiQL => "graphiql",
            Explorer::Playground => "playground",
        }
    }
}

impl fmt::Display for Explorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if the client is a browser asking for HTML and the explorer is enabled.
///
/// The `Accept` header must mention `text/html` and must not mention `application/json`, and
/// the URL must not carry the `raw` parameter.
pub fn wants_explorer<B>(config: &HandlerConfig, request: &Request<B>, explorer: Explorer) -> bool {
    if !config.explorer_enabled(explorer) {
        return false;
    }

    let raw = Params::parse(request.uri().query().unwrap_or_default().as_bytes()).contains(RAW_PARAMETER);

    let accept = request
        .headers()
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    !raw && !accept.contains(CONTENT_TYPE_JSON) && accept.contains(CONTENT_TYPE_HTML)
}
