use crate::payment::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PustakaError {
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error("record '{0}' not found")]
    RecordNotFound(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid sort direction '{0}'")]
    InvalidSortDirection(String),

    #[error("invalid filter expression '{0}': {1}")]
    InvalidFilter(String, String),

    #[error("payment rejected: {0}")]
    Payment(#[from] PaymentError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    ResponseShape(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PustakaError>;
