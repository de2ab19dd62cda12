/// Everything that can go wrong while enriching a batch.
///
/// `StorageFormat`, `Template` and `Config` are raised before any hash is
/// processed and abort the run. The rest are scoped to a single hash and are
/// reported by the orchestrator without stopping the batch.
#[derive(thiserror::Error, Debug)]
pub enum EnrichError {
    #[error("cannot read hash list {path}: {reason}")]
    StorageFormat { path: String, reason: String },
    #[error("service rejected request ({code}): {message}")]
    RemoteApi { code: String, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("template {name} unusable: {reason}")]
    Template { name: String, reason: String },
    #[error("serialization error: {reason}. File: {path}")]
    Serialization { path: String, reason: String },
    #[error("cannot write {path}: {reason}")]
    Persistence { path: String, reason: String },
    #[error("unexpected error: {0}")]
    Unexpected(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl EnrichError {
    /// Stable short name used in logs and `--json` outcomes.
    pub fn class(&self) -> &'static str {
        match self {
            EnrichError::StorageFormat { .. } => "storage_format",
            EnrichError::RemoteApi { .. } => "remote_api",
            EnrichError::Transport(_) => "transport",
            EnrichError::Template { .. } => "template",
            EnrichError::Serialization { .. } => "serialization",
            EnrichError::Persistence { .. } => "persistence",
            EnrichError::Unexpected(_) => "unexpected",
            EnrichError::Config(_) => "config",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EnrichError::StorageFormat { .. }
                | EnrichError::Template { .. }
                | EnrichError::Config(_)
        )
    }
}
