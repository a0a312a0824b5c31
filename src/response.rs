use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET,HEAD,POST,OPTIONS"),
    ("access-control-max-age", "86400"),
];

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
}

/// Wrap a serializable body into a JSON response.
pub fn json<T: Serialize>(body: &T, status: StatusCode) -> Response {
    let mut headers = cors_headers();

    match serde_json::to_string(body) {
        Ok(body) => {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json;charset=UTF-8"),
            );
            (status, headers, body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to serialize response body: {}", e);
            text("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Plain text response, the body is sent as-is.
pub fn text(body: &str, status: StatusCode) -> Response {
    (status, cors_headers(), body.to_string()).into_response()
}

/// Everything a lookup can fail with, each one maps to a fixed plain text reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InvalidQuery,
    NotFound,
    /// The upstream call failed, the message is what the caller gets to see.
    Upstream(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidQuery => "Invalid query",
            ApiError::NotFound => "Not found",
            ApiError::Upstream(message) => *message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        text(self.message(), self.status())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::json;

    use super::*;

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            headers["access-control-allow-methods"],
            "GET,HEAD,POST,OPTIONS"
        );
        assert_eq!(headers["access-control-max-age"], "86400");
    }

    #[tokio::test]
    async fn test_json_response() {
        let response = json(&json!({ "steamid": "123" }), StatusCode::OK);

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json;charset=UTF-8"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"steamid":"123"}"#);
    }

    #[tokio::test]
    async fn test_text_response() {
        let response = text("Not found", StatusCode::NOT_FOUND);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response);
        assert!(!response
            .headers()
            .get(header::CONTENT_TYPE)
            .is_some_and(|value| value.as_bytes().starts_with(b"application/json")));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Not found");
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(ApiError::InvalidQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.message(), "Not found");

        let upstream = ApiError::Upstream("Unable to verify id");
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream.message(), "Unable to verify id");
        assert_cors(&upstream.into_response());
    }
}
