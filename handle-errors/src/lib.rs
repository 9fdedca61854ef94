use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{MethodNotAllowed, Reject},
};

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    ParseError(std::num::ParseIntError),
    MissingParameters,
    InvalidCorrectOption,
    InvalidOptionIndex,
    QuestionNotFound,
    DatabaseQueryError(sqlx::Error),
    SerializationError(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &*self {
            Error::ParseError(err) => {
                write!(f, "Cannot parse parameter: {}", err)
            }
            Error::MissingParameters => {
                write!(f, "Missing parameters")
            }
            Error::InvalidCorrectOption => {
                write!(f, "Correct option must be a number between 1 and 4")
            }
            Error::InvalidOptionIndex => {
                write!(f, "Option index out of range")
            }
            Error::QuestionNotFound => {
                write!(f, "Question doesn't exist")
            }
            Error::DatabaseQueryError(_) => {
                write!(f, "Cannot query the database")
            }
            Error::SerializationError(_) => {
                write!(f, "Cannot encode or decode stored options")
            }
        }
    }
}

impl Reject for Error {}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(crate::Error::DatabaseQueryError(e)) = r.find() {
        event!(Level::ERROR, "Database query error: {:?}", e);
        Ok(warp::reply::with_status(
            "Internal Server Error".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else if let Some(crate::Error::SerializationError(e)) = r.find() {
        event!(Level::ERROR, "Cannot serialize options: {}", e);
        Ok(warp::reply::with_status(
            "Internal Server Error".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else if let Some(crate::Error::QuestionNotFound) = r.find() {
        event!(Level::WARN, "Question not found");
        Ok(warp::reply::with_status(
            crate::Error::QuestionNotFound.to_string(),
            StatusCode::BAD_REQUEST,
        ))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(warp::reply::with_status(
            error.to_string(),
            StatusCode::FORBIDDEN,
        ))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::WARN, "Cannot deserialize request body: {}", error);
        Ok(warp::reply::with_status(
            error.to_string(),
            StatusCode::BAD_REQUEST,
        ))
    } else if let Some(error) = r.find::<Error>() {
        event!(Level::WARN, "{}", error);
        Ok(warp::reply::with_status(
            error.to_string(),
            StatusCode::BAD_REQUEST,
        ))
    } else if let Some(error) = r.find::<MethodNotAllowed>() {
        event!(Level::WARN, "{}", error);
        Ok(warp::reply::with_status(
            error.to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        ))
    } else {
        event!(Level::WARN, "Requested route was not found");
        Ok(warp::reply::with_status(
            "Route not found".to_string(),
            StatusCode::NOT_FOUND,
        ))
    }
}
