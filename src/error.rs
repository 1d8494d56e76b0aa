use std::time::SystemTimeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Timestamp(#[from] SystemTimeError),

    #[error(transparent)]
    UrlParse(#[from] url::ParseError),

    #[error("expected one {name} line per account: {accounts} accounts, {got} {name} lines")]
    ListMismatch {
        name: &'static str,
        accounts: usize,
        got: usize,
    },

    #[error("init data has no `{0}` field")]
    InitData(&'static str),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("unexpected api response: {0}")]
    Api(String),
}
