use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::JsonPayloadError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use reqwest::Error as RequestError;
use serde_json::Error as JsonError;

use crate::violations::Violation;

pub const ERROR_CODE_HEADER: &str = "x-error-code";

#[derive(Debug, Derivative)]
#[derivative(PartialEq)]
pub enum Error {
    // 400
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    InvalidBrief {
        violation: Violation,
    },

    // 404
    PathNotFound,

    // 500
    ExistentialState(String),
    IoError(#[derivative(PartialEq = "ignore")] IoError),
    InvalidConfig {
        name: String,
        value: String,
    },
    GenerationRequestFailed(#[derivative(PartialEq = "ignore")] RequestError),
    GenerationServiceFailed {
        status: u16,
    },
    GenerationEmptyResponse,
    GenerationMalformedJson(#[derivative(PartialEq = "ignore")] JsonError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidBrief { .. } => "E4001001",
            Error::PathNotFound => "E4041000",
            Error::ExistentialState(_) => "E5001000",
            Error::IoError(_) => "E5001001",
            Error::InvalidConfig { .. } => "E5001002",
            Error::GenerationRequestFailed(_) => "E5002000",
            Error::GenerationServiceFailed { .. } => "E5002001",
            Error::GenerationEmptyResponse => "E5002002",
            Error::GenerationMalformedJson(_) => "E5002003",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidBrief { .. } => "The submitted brief is invalid",
            Error::PathNotFound => "The requested path was not found",
            Error::ExistentialState(_) => "The server detected an invalid state",
            Error::IoError(_) => "An error occurred during an I/O operation",
            Error::InvalidConfig { .. } => "The server configuration is invalid",
            Error::GenerationRequestFailed(_)
            | Error::GenerationServiceFailed { .. }
            | Error::GenerationEmptyResponse
            | Error::GenerationMalformedJson(_) => "The campaign workflow could not be generated",
        }
    }

    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            Error::GenerationRequestFailed(_)
                | Error::GenerationServiceFailed { .. }
                | Error::GenerationEmptyResponse
                | Error::GenerationMalformedJson(_)
        )
    }

    /// Text sent back to the caller. Only validation failures say what went
    /// wrong; everything else gets its generic message.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidBrief { violation } => violation.to_string(),
            _ => self.error_message().to_string(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidBrief { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::ExistentialState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GenerationRequestFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GenerationServiceFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GenerationEmptyResponse => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GenerationMalformedJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((ERROR_CODE_HEADER, self.error_code()))
            .content_type(ContentType::plaintext())
            .body(self.public_message())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Error {
        Error::InvalidBrief { violation }
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl From<RequestError> for Error {
    fn from(error: RequestError) -> Error {
        Error::GenerationRequestFailed(error)
    }
}

impl From<JsonError> for Error {
    fn from(error: JsonError) -> Error {
        Error::GenerationMalformedJson(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::IoError(err) => Some(err),
            Error::GenerationRequestFailed(err) => Some(err),
            Error::GenerationMalformedJson(err) => Some(err),
            _ => None,
        }
    }
}
