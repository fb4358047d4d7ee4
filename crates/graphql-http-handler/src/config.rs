use crate::negotiation::Explorer;

/// Settings fixed when the handler is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerConfig {
    /// Indent JSON responses with tabs
    pub pretty: bool,
    /// Serve GraphiQL to browsers
    pub graphiql: bool,
    /// Serve GraphQL Playground to browsers
    pub playground: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            graphiql: true,
            playground: false,
        }
    }
}

impl HandlerConfig {
    pub fn explorer_enabled(&self, explorer: Explorer) -> bool {
        match explorer {
            Explorer::GraphiQL => self.graphiql,
            Explorer::Playground => self.playground,
        }
    }
}
