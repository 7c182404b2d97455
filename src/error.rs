//! Defines the app level error type and conversions to rendered HTML pages.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{html::error_view, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
///
/// A month without a budget or without expenses is not an error, stores
/// return empty collections for that case.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted a value that could not be used, e.g., a negative
    /// amount, an empty category or a malformed month.
    ///
    /// The message is written for the user and is shown to them as is.
    #[error("{0}")]
    InvalidInput(String),

    /// A backing file could not be read, written or parsed.
    ///
    /// The message should only be logged for debugging on the server.
    /// When communicating with the client this error should be replaced
    /// with a generic internal server error.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Could not acquire the lock guarding a store.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                error_view("Bad Request", "400", "Invalid input", &message),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{assert_content_type, assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn invalid_input_is_a_bad_request() {
        let response = Error::InvalidInput("\"abc\" is not a number".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("\"abc\" is not a number"), "got {text}");
    }

    #[tokio::test]
    async fn storage_errors_hide_details() {
        let response =
            Error::StorageUnavailable("/secret/path/2024-01.json: denied".to_owned())
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(!text.contains("/secret/path"), "got {text}");
    }
}
