/// Error type for evaluator operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("rule registry lock poisoned: {0}")]
    RegistryPoisoned(String),
}
