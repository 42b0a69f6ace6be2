//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use moodlog_domain::ApiError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApiError);

impl From<InfraError> for ApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApiError> for InfraError {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoApiError {
    fn into_api(self) -> ApiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for HttpError {
    fn into_api(self) -> ApiError {
        // The configured duration is unknown here; `HttpClient::map_error`
        // reports transport timeouts as `ApiError::Timeout`.
        if self.is_timeout() {
            return ApiError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ApiError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return ApiError::Decode(format!("failed to decode response body: {self}"));
        }

        if self.is_builder() {
            return ApiError::Client(format!("invalid request: {self}"));
        }

        if let Some(status) = self.status() {
            let message = format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            );
            return ApiError::from_status(status.as_u16(), message);
        }

        ApiError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_api())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for JsonError {
    fn into_api(self) -> ApiError {
        ApiError::Decode(format!("invalid JSON: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_api())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for IoError {
    fn into_api(self) -> ApiError {
        ApiError::Storage(format!("{:?}: {self}", self.kind()))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_api())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for UrlError {
    fn into_api(self) -> ApiError {
        ApiError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        Self(value.into_api())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
