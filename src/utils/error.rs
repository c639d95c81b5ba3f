use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed topology: {0}")]
    MalformedTopology(String),
    #[error("node `{0}` is not part of the topology")]
    UnknownNode(String),
    #[error("{what} requires {requested}, exceeding the limit of {limit}")]
    ResourceBudgetExceeded {
        what: &'static str,
        limit: u64,
        requested: u64,
    },
    #[error("unknown routing algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn budget(what: &'static str, limit: usize, requested: u64) -> Self {
        Error::ResourceBudgetExceeded { what, limit: limit as u64, requested }
    }
}
