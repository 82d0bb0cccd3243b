use crate::config::ConfigError;
use client::ClientError;
use importer::ImportError;
use listing::records::UnknownVariant;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("API error: {0}")]
    Client(#[from] ClientError),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid option: {0}")]
    InvalidOption(#[from] UnknownVariant),
    #[error("could not set up metrics: {0}")]
    Metrics(String),
}
