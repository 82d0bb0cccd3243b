use thiserror::Error;

/// Errors that stop a bulk import before any create call is issued.
///
/// Failures of individual create calls are not errors at this level, they are
/// reported in [`crate::executor::ImportOutcome`].
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("no valid variables to import")]
    NothingToImport,

    #[error("could not load existing keys: {0}")]
    ExistingKeys(#[from] client::ClientError),
}
