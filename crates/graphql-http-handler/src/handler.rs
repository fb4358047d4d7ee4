use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response};

use crate::{
    config::HandlerConfig,
    execution::{self, ExecutionRequest, Executor, RequestContext, RootValue, RootValueFactory},
    explorer::{
        self,
        playground::{self, PlaygroundConfig},
        RenderExplorer,
    },
    negotiation::{self, Explorer},
    request_options::RequestOptions,
    response, Error,
};

/// Serves GraphQL requests for one schema.
///
/// Cheap to clone; all clones share the same immutable configuration.
pub struct Handler<E> {
    inner: Arc<HandlerInner<E>>,
}

struct HandlerInner<E> {
    schema: Arc<E>,
    config: HandlerConfig,
    root_value_factory: Option<RootValueFactory>,
    render_graphiql: RenderExplorer,
    render_playground: RenderExplorer,
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Handler<E>
where
    E: Executor,
{
    pub fn builder() -> HandlerBuilder<E> {
        HandlerBuilder::default()
    }

    pub fn schema(&self) -> &Arc<E> {
        &self.inner.schema
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.inner.config
    }

    /// Handles a request with a fresh context.
    pub async fn serve(&self, request: Request<Bytes>) -> Response<Bytes> {
        self.handle(RequestContext::default(), request).await
    }

    /// Handles a request, handing `context` to the engine as is.
    ///
    /// Browsers get an explorer page when one is enabled, everyone else gets the JSON result of
    /// the execution.
    pub async fn handle(&self, context: RequestContext, request: Request<Bytes>) -> Response<Bytes> {
        let inner = &self.inner;

        let options = RequestOptions::extract(&request);
        let execution_request =
            ExecutionRequest::build(options, context, inner.root_value_factory.as_ref(), &request);

        for explorer in Explorer::ALL {
            if negotiation::wants_explorer(&inner.config, &request, explorer) {
                tracing::debug!("rendering {explorer}");

                let render = match explorer {
                    Explorer::GraphiQL => &inner.render_graphiql,
                    Explorer::Playground => &inner.render_playground,
                };

                return render(&execution_request, request.uri());
            }
        }

        let outcome = execution::execute(inner.schema.as_ref(), execution_request).await;

        response::json(&outcome, inner.config.pretty)
    }
}

/// Collects the handler configuration. A schema is mandatory.
pub struct HandlerBuilder<E> {
    schema: Option<Arc<E>>,
    config: HandlerConfig,
    root_value_factory: Option<RootValueFactory>,
    render_graphiql: Option<RenderExplorer>,
    render_playground: Option<RenderExplorer>,
}

impl<E> Default for HandlerBuilder<E> {
    fn default() -> Self {
        Self {
            schema: None,
            config: HandlerConfig::default(),
            root_value_factory: None,
            render_graphiql: None,
            render_playground: None,
        }
    }
}

impl<E> HandlerBuilder<E>
where
    E: Executor,
{
    #[must_use]
    pub fn schema(self, schema: E) -> Self {
        self.shared_schema(Arc::new(schema))
    }

    /// Uses a schema that is also referenced elsewhere.
    #[must_use]
    pub fn shared_schema(mut self, schema: Arc<E>) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    #[must_use]
    pub fn graphiql(mut self, enabled: bool) -> Self {
        self.config.graphiql = enabled;
        self
    }

    #[must_use]
    pub fn playground(mut self, enabled: bool) -> Self {
        self.config.playground = enabled;
        self
    }

    /// Computes a root value for every request.
    #[must_use]
    pub fn root_value_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&RequestContext, &Request<Bytes>) -> RootValue + Send + Sync + 'static,
    {
        self.root_value_factory = Some(Arc::new(factory));
        self
    }

    /// Replaces the GraphiQL page.
    #[must_use]
    pub fn graphiql_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&ExecutionRequest, &http::Uri) -> Response<Bytes> + Send + Sync + 'static,
    {
        self.render_graphiql = Some(Arc::new(render));
        self
    }

    /// Replaces the Playground page.
    #[must_use]
    pub fn playground_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&ExecutionRequest, &http::Uri) -> Response<Bytes> + Send + Sync + 'static,
    {
        self.render_playground = Some(Arc::new(render));
        self
    }

    /// Keeps the default Playground page with extra headers, settings or endpoints.
    #[must_use]
    pub fn playground_config(self, config: PlaygroundConfig) -> Self {
        self.playground_renderer(playground::renderer(config))
    }

    pub fn build(self) -> Result<Handler<E>, Error> {
        let schema = self.schema.ok_or(Error::MissingSchema)?;

        Ok(Handler {
            inner: Arc::new(HandlerInner {
                schema,
                config: self.config,
                root_value_factory: self.root_value_factory,
                render_graphiql: self.render_graphiql.unwrap_or_else(explorer::default_graphiql),
                render_playground: self.render_playground.unwrap_or_else(explorer::default_playground),
            }),
        })
    }
}
