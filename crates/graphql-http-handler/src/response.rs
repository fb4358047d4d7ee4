use bytes::Bytes;
use http::{header::CONTENT_TYPE, HeaderValue, Response, StatusCode};
use serde::Serialize;

const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";
const TEXT_HTML_UTF8: &str = "text/html; charset=utf-8";

/// Writes an execution outcome as JSON, always with status 200.
///
/// GraphQL errors live in the body, they are never mapped to a status code.
pub fn json<T>(outcome: &T, pretty: bool) -> Response<Bytes>
where
    T: Serialize,
{
    let body = match to_vec(outcome, pretty) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("could not serialize the GraphQL response: {err}");
            Vec::new()
        }
    };

    with_content_type(Bytes::from(body), APPLICATION_JSON_UTF8)
}

/// An HTML page, status 200.
pub fn html(page: String) -> Response<Bytes> {
    with_content_type(Bytes::from(page), TEXT_HTML_UTF8)
}

fn with_content_type(body: Bytes, content_type: &'static str) -> Response<Bytes> {
    let mut response = Response::new(body);

    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

    response
}

fn to_vec<T>(value: &T, pretty: bool) -> serde_json::Result<Vec<u8>>
where
    T: Serialize,
{
    if !pretty {
        return serde_json::to_vec(value);
    }

    let mut buffer = Vec::with_capacity(128);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    Ok(buffer)
}
