use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("CATALOG/IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("CATALOG/PARSE: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("CATALOG/INVALID: {0}")]
    Invalid(String),
}
