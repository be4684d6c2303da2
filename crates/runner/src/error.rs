use thiserror::Error;

/// Failures starting a round
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("A trader name is required to start a round")]
    MissingName,
}
