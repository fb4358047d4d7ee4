use std::net::{Ipv4Addr, SocketAddr};

use graphql_http_handler::{router::DEFAULT_REQUEST_BODY_LIMIT, HandlerConfig};

/// The server configuration file.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub network: NetworkConfig,
    pub graph: GraphConfig,
    /// Maximum size of a request body, in bytes
    pub request_body_limit: usize,
    pub handler: HandlerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            graph: GraphConfig::default(),
            request_body_limit: DEFAULT_REQUEST_BODY_LIMIT,
            handler: HandlerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct NetworkConfig {
    pub listen_address: SocketAddr,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GraphConfig {
    /// Path of the GraphQL endpoint
    pub path: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: "/graphql".to_owned(),
        }
    }
}
