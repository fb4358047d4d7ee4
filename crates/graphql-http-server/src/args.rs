use std::{fs, io, net::SocketAddr, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};

mod log;

pub(crate) use log::{LogLevel, LogStyle};

use crate::config::Config;

pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "GraphQL HTTP server", version)]
/// Serves the Star Wars GraphQL schema over HTTP, with GraphiQL for browsers
pub(crate) struct Args {
    /// IP address on which the server will listen for incoming connections. Defaults to 127.0.0.1:8080.
    #[arg(short, long, env = "GRAPHQL_HTTP_LISTEN_ADDRESS")]
    pub listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "GRAPHQL_HTTP_CONFIG_PATH", default_value = "./graphql-http.toml")]
    pub config: PathBuf,
    /// Set the logging level
    #[arg(long = "log", env = "GRAPHQL_HTTP_LOG")]
    pub log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "GRAPHQL_HTTP_LOG_STYLE", default_value_t = LogStyle::Text)]
    pub log_style: LogStyle,
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Reads the configuration file. A missing file means the defaults.
    pub fn config(&self) -> anyhow::Result<Config> {
        let contents = match fs::read_to_string(&self.config) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err).with_context(|| format!("reading {}", self.config.display())),
        };

        toml::from_str(&contents).with_context(|| format!("parsing {}", self.config.display()))
    }

    pub fn log_filter(&self) -> &'static str {
        self.log_level.unwrap_or_default().as_filter_str()
    }

    pub fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer();

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if atty::is(atty::Stream::Stdout) => layer.with_ansi(true).boxed(),
            // for server logs, colors are off
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}
