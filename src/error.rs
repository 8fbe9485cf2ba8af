use thiserror::Error;

/// Failure classes for one regeneration run. Every variant is fatal for the
/// run: the pipeline aborts, the previously published page stays live, and
/// the process exits non-zero.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config: {0}")]
    Config(String),

    #[error("data access: {0}")]
    DataAccess(String),

    #[error("template: {0}")]
    Template(String),

    #[error("publish: {0}")]
    Publish(String),
}
