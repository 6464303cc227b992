use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::exception::Exception;
use crate::exception::error_code;
use crate::log;

pub type HttpResult<T> = Result<T, HttpError>;

pub struct HttpError {
    exception: Exception,
}

impl HttpError {
    fn status(&self) -> StatusCode {
        if self.exception.has_code(error_code::VALIDATION_ERROR) {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<Exception> for HttpError {
    fn from(exception: Exception) -> Self {
        HttpError { exception }
    }
}

// the message is shown as is, callers of these endpoints are people reading a page
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        log::log_exception(&self.exception);
        let status = self.status();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.exception.message,
        )
            .into_response()
    }
}
