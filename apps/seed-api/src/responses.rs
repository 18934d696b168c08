use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use seed_protocol::ErrorBody;
use serde::de::DeserializeOwned;

use crate::AppState;

/// Envelope title for unexpected failures, shared with the panic handler.
pub(crate) const INTERNAL_TITLE: &str = "Something went wrong!";
pub(crate) const REDACTED_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },
    #[error("{context}: {source:#}")]
    Internal {
        context: &'static str,
        #[source]
        source: anyhow::Error,
        /// Detailed messages are only sent to clients in development mode.
        expose: bool,
    },
}

impl ApiError {
    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            what,
            id: id.into(),
        }
    }

    pub fn internal(context: &'static str, source: anyhow::Error, expose: bool) -> Self {
        ApiError::Internal {
            context,
            source,
            expose,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Message for a 500 body: the detail in development mode, a fixed string otherwise.
pub(crate) fn client_message(detail: &str, expose: bool) -> String {
    if expose {
        detail.to_string()
    } else {
        REDACTED_MESSAGE.to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotFound { what, id } => {
                ErrorBody::new(format!("{what} not found")).with_id(id.clone())
            }
            ApiError::Internal {
                context,
                source,
                expose,
            } => {
                tracing::error!(error = %format!("{source:#}"), "{context}");
                ErrorBody::new(*context).with_message(client_message(&format!("{source:#}"), *expose))
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Request body where an empty payload means "all defaults".
///
/// JSON unless the request is `application/x-www-form-urlencoded`. A body that
/// does not decode into `T` is an internal error, reported through the same
/// envelope as any other unexpected failure.
#[derive(Debug, Clone, Default)]
pub(crate) struct Payload<T>(pub T);

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

impl<T> FromRequest<AppState> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let expose = state.dev_mode();
        if is_form(req.headers()) {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|err| {
                ApiError::internal(INTERNAL_TITLE, anyhow::Error::new(err), expose)
            })?;
            return Ok(Payload(value));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| ApiError::internal(INTERNAL_TITLE, anyhow::Error::new(err), expose))?;
        parse_body(&bytes)
            .map(Payload)
            .map_err(|err| ApiError::internal(INTERNAL_TITLE, err, expose))
    }
}

fn parse_body<T>(bytes: &[u8]) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let value = serde_json::from_slice(bytes)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_protocol::{CompleteCycleRequest, StartEngineRequest};

    #[test]
    fn empty_body_means_defaults() {
        let req: StartEngineRequest = parse_body(b"").unwrap();
        assert_eq!(req, StartEngineRequest::default());
        let req: CompleteCycleRequest = parse_body(b"  \n").unwrap();
        assert!(req.improvements.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_body::<StartEngineRequest>(b"{not json").is_err());
        assert!(parse_body::<StartEngineRequest>(br#"{"cycles":"many"}"#).is_err());
    }

    #[test]
    fn form_content_type_is_detected() {
        let mut headers = HeaderMap::new();
        assert!(!is_form(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8".parse().unwrap(),
        );
        assert!(is_form(&headers));
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(!is_form(&headers));
    }

    #[test]
    fn redaction_depends_on_mode() {
        assert_eq!(client_message("boom", true), "boom");
        assert_eq!(client_message("boom", false), REDACTED_MESSAGE);
    }

    #[test]
    fn not_found_status() {
        let err = ApiError::not_found("Path", "nope");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Path not found: nope");
    }
}
