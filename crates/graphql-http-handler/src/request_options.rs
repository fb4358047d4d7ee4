use std::borrow::Cow;

use http::{header::CONTENT_TYPE, HeaderMap, Method, Request};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Named input values referenced by the variables of a GraphQL document.
pub type Variables = serde_json::Map<String, Value>;

const CONTENT_TYPE_GRAPHQL: &str = "application/graphql";
const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

/// The GraphQL parameters of one HTTP request, whatever encoding the client picked.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(default, deserialize_with = "nullable_string")]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub operation_name: String,
}

/// Clients sometimes send `variables` JSON-encoded inside a string.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompatibilityRequestOptions {
    #[serde(default, deserialize_with = "nullable_string")]
    query: String,
    #[serde(default)]
    variables: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    operation_name: String,
}

impl From<CompatibilityRequestOptions> for RequestOptions {
    fn from(options: CompatibilityRequestOptions) -> Self {
        let variables = options.variables.and_then(|raw| {
            serde_json::from_str::<Option<Variables>>(&raw)
                .inspect_err(|err| tracing::debug!("string encoded variables are not a JSON object: {err}"))
                .ok()
                .flatten()
        });

        RequestOptions {
            query: options.query,
            variables,
            operation_name: options.operation_name,
        }
    }
}

impl RequestOptions {
    /// Extracts the GraphQL parameters from a request.
    ///
    /// A `query` URL parameter takes precedence over everything else. Otherwise only `POST`
    /// requests with a non-empty body are considered, decoded according to their
    /// `Content-Type`. This never fails: malformed input degrades to default fields and the
    /// engine reports whatever is left as a GraphQL error.
    pub fn extract<B>(request: &Request<B>) -> Self
    where
        B: AsRef<[u8]>,
    {
        let query_params = Params::parse(request.uri().query().unwrap_or_default().as_bytes());

        if let Some(options) = Self::from_params(&query_params) {
            return options;
        }

        let body = request.body().as_ref();

        if request.method() != Method::POST || body.is_empty() {
            return Self::default();
        }

        match ContentType::from_headers(request.headers()) {
            ContentType::Graphql => RequestOptions {
                query: String::from_utf8_lossy(body).into_owned(),
                ..Default::default()
            },
            ContentType::FormUrlEncoded => Self::from_params(&Params::parse(body)).unwrap_or_default(),
            ContentType::Json => Self::from_json(body),
        }
    }

    /// Reads `query`, `variables` and `operationName` from URL or form parameters.
    ///
    /// Returns `None` when there is no `query`, or when `variables` is not a JSON object.
    fn from_params(params: &Params<'_>) -> Option<Self> {
        let query = params.get("query")?;

        let variables = match params.get("variables") {
            None | Some("") => Variables::new(),
            Some(raw) => match serde_json::from_str::<Option<Variables>>(raw) {
                Ok(variables) => variables.unwrap_or_default(),
                Err(err) => {
                    tracing::debug!("ignoring parameters, variables are not a JSON object: {err}");
                    return None;
                }
            },
        };

        Some(RequestOptions {
            query: query.to_owned(),
            variables: Some(variables),
            operation_name: params.get("operationName").unwrap_or_default().to_owned(),
        })
    }

    fn from_json(body: &[u8]) -> Self {
        let err = match serde_json::from_slice::<RequestOptions>(body) {
            Ok(options) => return options,
            Err(err) => err,
        };

        match serde_json::from_slice::<CompatibilityRequestOptions>(body) {
            Ok(options) => {
                tracing::debug!("request body decoded with string encoded variables");
                options.into()
            }
            Err(_) => {
                tracing::debug!("request body is not a GraphQL JSON request: {err}");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentType {
    Graphql,
    FormUrlEncoded,
    Json,
}

impl ContentType {
    /// Only the media type before the first `;` is compared, and it must match exactly.
    /// Anything unknown is treated as JSON.
    fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        match value.split(';').next().unwrap_or_default() {
            CONTENT_TYPE_GRAPHQL => ContentType::Graphql,
            CONTENT_TYPE_FORM_URL_ENCODED => ContentType::FormUrlEncoded,
            CONTENT_TYPE_JSON => ContentType::Json,
            _ => ContentType::Json,
        }
    }
}

/// Decoded `application/x-www-form-urlencoded` pairs, in order.
pub(crate) struct Params<'a>(Vec<(Cow<'a, str>, Cow<'a, str>)>);

impl<'a> Params<'a> {
    pub(crate) fn parse(input: &'a [u8]) -> Self {
        Params(url::form_urlencoded::parse(input).collect())
    }

    /// The first value for `key`.
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_ref())
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(name, _)| name == key)
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
