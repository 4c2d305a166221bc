use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum StateError {
    State(String),
    Serde(serde_json::Error),
}

impl Error for StateError {}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateError::State(message) => write!(f, "{message}"),
            StateError::Serde(err) => write!(f, "{err}"),
        }
    }
}

impl From<String> for StateError {
    fn from(err: String) -> Self {
        StateError::State(err)
    }
}

impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        StateError::Serde(err)
    }
}
