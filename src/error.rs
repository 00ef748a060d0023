use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CspError {
    #[error("Invalid directive value: {0}")]
    InvalidDirectiveValue(String),

    #[error("Header processing error: {0}")]
    HeaderError(String),
}

impl ResponseError for CspError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidDirectiveValue(_) => StatusCode::BAD_REQUEST,
            Self::HeaderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
