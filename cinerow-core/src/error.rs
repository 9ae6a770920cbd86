use thiserror::Error;

/// Coarse classification every provider failure collapses into.
///
/// Controllers only care which fallback to show, not which transport
/// detail went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a successful response.
    NetworkFailure,
    /// Well-formed response without a usable record.
    EmptyResult,
    /// Response did not have the expected shape.
    Malformed,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider responded with status {0}")]
    Status(u16),

    #[error("No matching record")]
    Empty,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Missing credentials for {0}")]
    MissingCredentials(&'static str),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Network(_)
            | CatalogError::Status(_)
            | CatalogError::InvalidBaseUrl(_)
            | CatalogError::MissingCredentials(_) => ErrorKind::NetworkFailure,
            CatalogError::Empty => ErrorKind::EmptyResult,
            CatalogError::Malformed(_) => ErrorKind::Malformed,
        }
    }

    pub fn is_empty_result(&self) -> bool {
        self.kind() == ErrorKind::EmptyResult
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}
