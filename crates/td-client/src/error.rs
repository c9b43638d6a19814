use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur during API calls
#[derive(Error, Debug)]
pub enum ClientError {
    /// Credential rejected. Callers clear the stored credential and
    /// re-authenticate.
    #[error("Unauthorized {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("API error: {message} (status: {status}) {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Malformed response: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: Some(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
