//! Fan-out of create calls for a parsed import.

use crate::errors::ImportError;
use crate::metrics_defs::{IMPORT_DURATION, IMPORT_VARIABLE_CREATED, IMPORT_VARIABLE_FAILED};
use crate::parser::{ParseReport, Parser};
use client::VariableStore;
use client::types::ImportTarget;
use shared::{counter, histogram};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Instant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportFailure {
    pub key: String,
    pub reason: String,
}

/// Settled result of every create call of one import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Keys created, in completion order
    pub succeeded: Vec<String>,
    pub failed: Vec<ImportFailure>,
}

impl ImportOutcome {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// At least one variable was created.
    pub fn is_success(&self) -> bool {
        !self.succeeded.is_empty()
    }

    /// Some variables were created and some were not. Terminal, nothing is rolled back.
    pub fn is_partial(&self) -> bool {
        self.is_success() && !self.failed.is_empty()
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed",
            self.succeeded_count(),
            self.failed_count()
        )
    }
}

/// Runs bulk imports against a [`VariableStore`].
#[derive(Clone)]
pub struct ImportExecutor {
    store: Arc<dyn VariableStore>,
}

impl ImportExecutor {
    pub fn new(store: Arc<dyn VariableStore>) -> Self {
        Self { store }
    }

    /// Parses `text` against the keys already present in `target`.
    pub async fn prepare(
        &self,
        target: &ImportTarget,
        text: &str,
    ) -> Result<ParseReport, ImportError> {
        let existing = self.store.existing_keys(target).await?;
        Ok(Parser::new().with_existing_keys(existing).parse(text))
    }

    /// Issues one create call per valid record, all at once, and waits for
    /// every one of them to settle. A failed call never cancels the others and
    /// nothing is retried.
    pub async fn execute(
        &self,
        target: &ImportTarget,
        report: &ParseReport,
    ) -> Result<ImportOutcome, ImportError> {
        let variables: Vec<_> = report.valid().map(|v| v.to_new_variable()).collect();
        if variables.is_empty() {
            return Err(ImportError::NothingToImport);
        }

        let start = Instant::now();
        let mut join_set = JoinSet::new();
        // Keys by task, so a panicked task can still be reported against its key
        let mut task_keys = HashMap::new();

        for variable in variables {
            let store = self.store.clone();
            let target = target.clone();
            let key = variable.key.clone();
            let variable_key = key.clone();

            let abort_handle = join_set.spawn(async move {
                let result = store.create_variable(&target, variable).await;
                (key, result)
            });
            task_keys.insert(abort_handle.id(), variable_key);
        }

        let mut outcome = ImportOutcome::default();

        while let Some(join_result) = join_set.join_next_with_id().await {
            match join_result {
                Ok((task_id, (key, Ok(_created)))) => {
                    task_keys.remove(&task_id);
                    counter!(IMPORT_VARIABLE_CREATED).increment(1);
                    outcome.succeeded.push(key);
                }
                Ok((task_id, (key, Err(e)))) => {
                    task_keys.remove(&task_id);
                    tracing::warn!(key = %key, error = %e, "Failed to create variable");
                    counter!(IMPORT_VARIABLE_FAILED).increment(1);
                    outcome.failed.push(ImportFailure {
                        key,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!("Import task failed: {e}");
                    counter!(IMPORT_VARIABLE_FAILED).increment(1);
                    if let Some(key) = task_keys.remove(&e.id()) {
                        outcome.failed.push(ImportFailure {
                            key,
                            reason: "create task panicked".to_string(),
                        });
                    }
                }
            }
        }

        histogram!(IMPORT_DURATION).record(start.elapsed().as_secs_f64());
        tracing::info!(
            app_id = %target.app_id,
            env_type_id = %target.env_type_id,
            succeeded = outcome.succeeded_count(),
            failed = outcome.failed_count(),
            "Bulk import finished"
        );

        Ok(outcome)
    }
}
