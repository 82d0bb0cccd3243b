use crate::client::ClientError;
use crate::types::{EnvironmentVariable, ImportTarget, NewVariable};
use async_trait::async_trait;

/// Destination of a bulk import. Implemented by the API client, and by
/// in-memory fakes in tests.
#[async_trait]
pub trait VariableStore: Send + Sync {
    /// Keys already present in the target environment.
    async fn existing_keys(&self, target: &ImportTarget) -> Result<Vec<String>, ClientError>;

    async fn create_variable(
        &self,
        target: &ImportTarget,
        variable: NewVariable,
    ) -> Result<EnvironmentVariable, ClientError>;
}
