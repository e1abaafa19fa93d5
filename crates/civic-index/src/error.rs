use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::icc::IccServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Service(IccServiceError),
    Submission {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Service(err) => write!(f, "icc service error: {}", err),
            AppError::Submission { path, source } => {
                write!(f, "invalid submission file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Service(err) => Some(err),
            AppError::Submission { source, .. } => Some(source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Service(IccServiceError::MissingField(_)) | AppError::Submission { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Service(IccServiceError::Score(_) | IccServiceError::Topic(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Service(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<IccServiceError> for AppError {
    fn from(value: IccServiceError) -> Self {
        Self::Service(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::icc::{ScoreError, StoreError};

    #[test]
    fn score_failures_map_to_unprocessable_entity() {
        let error = AppError::from(IccServiceError::Score(ScoreError::EmptyRubric));
        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn missing_fields_map_to_bad_request() {
        let error = AppError::from(IccServiceError::MissingField("respondent"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_internal_error() {
        let error = AppError::from(IccServiceError::Store(StoreError::Unavailable(
            "read only".to_string(),
        )));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn submission_errors_name_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = AppError::Submission {
            path: PathBuf::from("respostas.json"),
            source,
        };

        assert!(error.to_string().starts_with("invalid submission file respostas.json:"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
