use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fatality_charts::UnknownDimension;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    UnknownDimension(#[from] UnknownDimension),
    #[error("Generic error {0}")]
    AnyhowError(#[from] anyhow::Error),
    #[error("Error serializing chart {0}")]
    Json(#[from] serde_json::Error),
    #[error("Internal HTTP Error {0}")]
    AxumError(#[from] axum::http::Error),
}

impl WebError {
    pub(crate) fn as_status_code(&self) -> StatusCode {
        match self {
            WebError::UnknownDimension(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.as_status_code();
        if status.is_server_error() {
            error!("Error returned {self:?}");
        }
        (status, format!("{self}")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_dimension_is_a_client_error() {
        let err = WebError::from(UnknownDimension("Weekday".to_string()));
        assert_eq!(err.as_status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Weekday"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_errors_are_server_errors() {
        let err = WebError::from(anyhow::anyhow!("plot failed"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
